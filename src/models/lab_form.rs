use super::trip_item::LabStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LabFormStatus {
    #[default]
    Draft,
    Submitted,
    WaitingConfirm,
    Approved,
}

impl LabFormStatus {
    pub fn code(&self) -> &'static str {
        match self {
            LabFormStatus::Draft => "DRAFT",
            LabFormStatus::Submitted => "SUBMITTED",
            LabFormStatus::WaitingConfirm => "WAITING_CONFIRM",
            LabFormStatus::Approved => "APPROVED",
        }
    }

    /// Trip item status mirrored on every form upsert.
    pub fn to_lab_status(&self) -> LabStatus {
        match self {
            LabFormStatus::Approved => LabStatus::Accepted,
            LabFormStatus::WaitingConfirm => LabStatus::WaitingConfirm,
            LabFormStatus::Submitted => LabStatus::Submitted,
            LabFormStatus::Draft => LabStatus::Draft,
        }
    }
}

/// A file attached to a lab form, held inline as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabFormDocument {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub uploaded_at: String,
    pub data_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabForm {
    pub id: u32,
    pub trip_item_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_no: Option<String>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    pub status: LabFormStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpc_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<LabFormDocument>,
}
