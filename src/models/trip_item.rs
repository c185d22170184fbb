use super::trip::DutyType;
use serde::{Deserialize, Serialize};

/// Lab intake state of a trip item.
///
/// `APPROVED` is read as `ACCEPTED`: both name the terminal accept state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LabStatus {
    Pending,
    Draft,
    Submitted,
    WaitingConfirm,
    #[serde(alias = "APPROVED")]
    Accepted,
}

impl LabStatus {
    pub fn code(&self) -> &'static str {
        match self {
            LabStatus::Pending => "PENDING",
            LabStatus::Draft => "DRAFT",
            LabStatus::Submitted => "SUBMITTED",
            LabStatus::WaitingConfirm => "WAITING_CONFIRM",
            LabStatus::Accepted => "ACCEPTED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LabStatus::Pending => "Pending",
            LabStatus::Draft => "Draft",
            LabStatus::Submitted => "Submitted",
            LabStatus::WaitingConfirm => "Waiting confirmation",
            LabStatus::Accepted => "Accepted",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().replace('-', "_").as_str() {
            "PENDING" => Some(LabStatus::Pending),
            "DRAFT" => Some(LabStatus::Draft),
            "SUBMITTED" => Some(LabStatus::Submitted),
            "WAITING_CONFIRM" => Some(LabStatus::WaitingConfirm),
            "ACCEPTED" | "APPROVED" => Some(LabStatus::Accepted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabShipmentDetails {
    pub production_date: String,
    pub last_sale_date: String,
    pub storage: String,
    pub seal_no: String,
    #[serde(default)]
    pub foreign_matter: String,
    #[serde(default)]
    pub weight: String,
}

impl LabShipmentDetails {
    /// (key, label, value, is_date) rows in display order.
    pub fn fields(&self) -> Vec<(&'static str, &'static str, &str, bool)> {
        vec![
            ("productionDate", "Production date", &self.production_date, true),
            ("lastSaleDate", "Last sale date", &self.last_sale_date, true),
            ("storage", "Silo / storage no", &self.storage, false),
            ("sealNo", "Seal no", &self.seal_no, false),
            ("foreignMatter", "Foreign matter", &self.foreign_matter, false),
            ("weight", "Sample weight (kg)", &self.weight, false),
        ]
    }
}

/// Join between a trip and a company product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripItem {
    pub id: u32,
    pub trip_id: u32,
    pub company_product_id: u32,
    #[serde(default)]
    pub sampled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampled_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_status: Option<LabStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_sent_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_shipment_details: Option<LabShipmentDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_assigned_lab_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_entry_code: Option<String>,
    #[serde(default)]
    pub duty_type: DutyType,
    #[serde(default)]
    pub duty_assignee_ids: Vec<u32>,
}

impl TripItem {
    pub fn new(id: u32, trip_id: u32, company_product_id: u32, duty_type: DutyType) -> Self {
        Self {
            id,
            trip_id,
            company_product_id,
            sampled: false,
            sampled_at: None,
            lab_status: Some(LabStatus::Pending),
            lab_sent_at: None,
            lab_shipment_details: None,
            lab_assigned_lab_id: None,
            lab_entry_code: None,
            duty_type,
            duty_assignee_ids: Vec::new(),
        }
    }
}
