use super::product_type::ProductType;
use serde::{Deserialize, Serialize};

/// Derived from trips: `busy` while assigned to a planned or active trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Available,
    Busy,
}

impl EmployeeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EmployeeStatus::Available => "Available",
            EmployeeStatus::Busy => "In the field",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub skills: Vec<ProductType>,
}

impl Employee {
    pub fn is_available(&self) -> bool {
        self.status == EmployeeStatus::Available
    }
}
