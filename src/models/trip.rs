use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    Planned,
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn code(&self) -> &'static str {
        match self {
            TripStatus::Planned => "PLANNED",
            TripStatus::Active => "ACTIVE",
            TripStatus::Completed => "COMPLETED",
            TripStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Planned => "Planned",
            TripStatus::Active => "Active",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        }
    }

    /// Planned and active trips keep their assignees busy.
    pub fn is_open(&self) -> bool {
        matches!(self, TripStatus::Planned | TripStatus::Active)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "PLANNED" => Some(TripStatus::Planned),
            "ACTIVE" => Some(TripStatus::Active),
            "COMPLETED" => Some(TripStatus::Completed),
            "CANCELLED" | "CANCELED" => Some(TripStatus::Cancelled),
            _ => None,
        }
    }
}

/// What a visit does for one company product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DutyType {
    /// Factory inspection only.
    #[serde(rename = "GÖZETİM", alias = "GOZETIM")]
    Inspection,
    /// Sample collection only.
    #[default]
    #[serde(rename = "NUMUNE")]
    Sample,
    #[serde(rename = "BOTH")]
    Both,
}

impl DutyType {
    pub fn code(&self) -> &'static str {
        match self {
            DutyType::Inspection => "GÖZETİM",
            DutyType::Sample => "NUMUNE",
            DutyType::Both => "BOTH",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DutyType::Inspection => "Inspection",
            DutyType::Sample => "Sample",
            DutyType::Both => "Inspection + Sample",
        }
    }

    pub fn requires_sample(&self) -> bool {
        matches!(self, DutyType::Sample | DutyType::Both)
    }

    pub fn requires_inspection(&self) -> bool {
        matches!(self, DutyType::Inspection | DutyType::Both)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "GÖZETİM" | "GOZETIM" | "INSPECTION" | "G" | "I" => Some(DutyType::Inspection),
            "NUMUNE" | "SAMPLE" | "N" | "S" => Some(DutyType::Sample),
            "BOTH" | "B" => Some(DutyType::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyAssignment {
    pub duty_type: DutyType,
    #[serde(default)]
    pub duty_assignee_ids: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    CompanyVehicle,
    Bus,
    Plane,
    Train,
}

impl TransportMode {
    pub fn code(&self) -> &'static str {
        match self {
            TransportMode::CompanyVehicle => "COMPANY_VEHICLE",
            TransportMode::Bus => "BUS",
            TransportMode::Plane => "PLANE",
            TransportMode::Train => "TRAIN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::CompanyVehicle => "Company vehicle",
            TransportMode::Bus => "Bus",
            TransportMode::Plane => "Plane",
            TransportMode::Train => "Train",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().replace('-', "_").as_str() {
            "COMPANY_VEHICLE" | "CAR" => Some(TransportMode::CompanyVehicle),
            "BUS" => Some(TransportMode::Bus),
            "PLANE" => Some(TransportMode::Plane),
            "TRAIN" => Some(TransportMode::Train),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LodgingProvider {
    /// Paid by the visited company.
    Company,
    /// Paid by the certification body.
    Cpc,
}

impl LodgingProvider {
    pub fn code(&self) -> &'static str {
        match self {
            LodgingProvider::Company => "COMPANY",
            LodgingProvider::Cpc => "CPC",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "COMPANY" => Some(LodgingProvider::Company),
            "CPC" => Some(LodgingProvider::Cpc),
            _ => None,
        }
    }
}

/// A field visit. Duty assignments are keyed by company product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_at: Option<String>,
    pub status: TripStatus,
    #[serde(default)]
    pub assignee_ids: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lodging_provider: Option<LodgingProvider>,
    #[serde(default)]
    pub duty_assignments: BTreeMap<u32, DutyAssignment>,
}

impl Trip {
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Trip #{}", self.id))
    }
}
