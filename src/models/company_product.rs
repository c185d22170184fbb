use serde::{Deserialize, Serialize};

/// Certification status of a company product.
///
/// - `devam`: ongoing, regular sampling cadence
/// - `kesikli`: intermittent production, doubled interval
/// - `aski`: suspended, no sampling due
/// - `iptal`: cancelled (archived), no sampling due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyProductStatus {
    #[default]
    Devam,
    Kesikli,
    Aski,
    Iptal,
}

impl CompanyProductStatus {
    pub fn code(&self) -> &'static str {
        match self {
            CompanyProductStatus::Devam => "devam",
            CompanyProductStatus::Kesikli => "kesikli",
            CompanyProductStatus::Aski => "aski",
            CompanyProductStatus::Iptal => "iptal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompanyProductStatus::Devam => "Ongoing",
            CompanyProductStatus::Kesikli => "Intermittent",
            CompanyProductStatus::Aski => "Suspended",
            CompanyProductStatus::Iptal => "Cancelled",
        }
    }

    /// Suspended or cancelled products have no sampling obligation.
    pub fn is_suspended(&self) -> bool {
        matches!(self, CompanyProductStatus::Aski | CompanyProductStatus::Iptal)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "devam" => Some(CompanyProductStatus::Devam),
            "kesikli" => Some(CompanyProductStatus::Kesikli),
            "aski" | "askı" => Some(CompanyProductStatus::Aski),
            "iptal" => Some(CompanyProductStatus::Iptal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// paid
    Yapti,
    /// not paid
    Yapmadi,
    /// exempt
    Muaf,
}

impl PaymentStatus {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentStatus::Yapti => "yapti",
            PaymentStatus::Yapmadi => "yapmadi",
            PaymentStatus::Muaf => "muaf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Yapti => "Paid",
            PaymentStatus::Yapmadi => "Unpaid",
            PaymentStatus::Muaf => "Exempt",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "yapti" | "paid" => Some(PaymentStatus::Yapti),
            "yapmadi" | "unpaid" => Some(PaymentStatus::Yapmadi),
            "muaf" | "exempt" => Some(PaymentStatus::Muaf),
            _ => None,
        }
    }
}

/// A certified product held by a company, optionally at one of its sites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProduct {
    pub id: u32,
    pub company_id: u32,
    pub product_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sample_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_inspection_date: Option<String>,
    #[serde(default)]
    pub status: CompanyProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl CompanyProduct {
    pub fn new(id: u32, company_id: u32, product_id: u32) -> Self {
        Self {
            id,
            company_id,
            product_id,
            site_id: None,
            product_code: None,
            certificate_no: None,
            certificate_date: None,
            last_sample_date: None,
            last_inspection_date: None,
            status: CompanyProductStatus::Devam,
            payment_status: None,
        }
    }
}
