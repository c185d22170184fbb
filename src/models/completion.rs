use super::trip::{DutyType, LodgingProvider, TransportMode};
use serde::{Deserialize, Serialize};

/// Outcome of one trip item on a completed trip, with its expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCompletionEntry {
    pub trip_item_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duty_type: Option<DutyType>,
    #[serde(default)]
    pub duty_assignee_ids: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspected_at: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sample_not_completed: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inspection_not_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lodging_payment_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_expense: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_lunch_expense: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_dinner_expense: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_expense: Option<f64>,
}

impl TripCompletionEntry {
    pub fn new(trip_item_id: u32) -> Self {
        Self {
            trip_item_id,
            ..Default::default()
        }
    }

    /// Sum of every expense figure recorded on the entry.
    pub fn total_expense(&self) -> f64 {
        [
            self.lodging_payment_amount,
            self.transport_expense,
            self.meal_lunch_expense,
            self.meal_dinner_expense,
            self.company_expense,
        ]
        .iter()
        .flatten()
        .sum()
    }
}

/// Payload of `complete_trip`: a completion without its timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTripInput {
    #[serde(default)]
    pub trip_id: u32,
    #[serde(default)]
    pub completed_by_employee_ids: Vec<u32>,
    #[serde(default)]
    pub transport_mode: Option<TransportMode>,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    #[serde(default)]
    pub total_km: Option<f64>,
    #[serde(default)]
    pub total_days: Option<u32>,
    #[serde(default)]
    pub lodging_provider: Option<LodgingProvider>,
    #[serde(default)]
    pub entries: Vec<TripCompletionEntry>,
}

/// Finalization record of a trip; at most one per trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCompletion {
    pub trip_id: u32,
    #[serde(default)]
    pub completed_by_employee_ids: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lodging_provider: Option<LodgingProvider>,
    #[serde(default)]
    pub entries: Vec<TripCompletionEntry>,
    pub created_at: String,
}

impl TripCompletion {
    pub fn from_input(input: CompleteTripInput, entries: Vec<TripCompletionEntry>, created_at: String) -> Self {
        Self {
            trip_id: input.trip_id,
            completed_by_employee_ids: input.completed_by_employee_ids,
            transport_mode: input.transport_mode,
            vehicle_plate: input.vehicle_plate,
            total_km: input.total_km,
            total_days: input.total_days,
            lodging_provider: input.lodging_provider,
            entries,
            created_at,
        }
    }

    pub fn total_expense(&self) -> f64 {
        self.entries.iter().map(TripCompletionEntry::total_expense).sum()
    }
}
