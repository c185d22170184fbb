use crate::config::{InspectionPolicy, SamplingCycles};
use crate::core::due::{DueFilters, DueRow, build_due_list};
use crate::core::priority::PriorityFlag;
use crate::models::{LabFormStatus, LabStatus, ProductType, TripStatus};
use crate::store::AppState;
use crate::utils::date::parse_opt;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabCounts {
    pub pending: usize,
    pub draft: usize,
    pub submitted: usize,
    pub waiting_confirm: usize,
    pub accepted: usize,
}

#[derive(Debug, Clone)]
pub struct DashboardSummary<'a> {
    pub due_concrete: usize,
    pub due_cement: usize,
    pub active_trips: usize,
    pub lab: LabCounts,
    /// Days from shipment to approval, averaged over approved forms.
    pub avg_turnaround_days: Option<f64>,
    pub top_prioritized: Vec<DueRow<'a>>,
}

pub fn lab_counts(state: &AppState) -> LabCounts {
    let mut counts = LabCounts::default();
    for item in &state.trip_items {
        match item.lab_status {
            Some(LabStatus::Pending) => counts.pending += 1,
            Some(LabStatus::Draft) => counts.draft += 1,
            Some(LabStatus::Submitted) => counts.submitted += 1,
            Some(LabStatus::WaitingConfirm) => counts.waiting_confirm += 1,
            Some(LabStatus::Accepted) => counts.accepted += 1,
            None => {}
        }
    }
    counts
}

pub fn average_turnaround_days(state: &AppState) -> Option<f64> {
    let spans: Vec<i64> = state
        .lab_forms
        .iter()
        .filter(|f| f.status == LabFormStatus::Approved)
        .filter_map(|f| {
            let item = state.trip_item(f.trip_item_id)?;
            let sent = parse_opt(item.lab_sent_at.as_deref())?;
            let approved = parse_opt(f.updated_at.as_deref())?;
            Some((approved - sent).num_days().max(0))
        })
        .collect();

    if spans.is_empty() {
        None
    } else {
        Some(spans.iter().sum::<i64>() as f64 / spans.len() as f64)
    }
}

pub fn build_dashboard<'a>(
    state: &'a AppState,
    cycles: &SamplingCycles,
    policy: &InspectionPolicy,
    today: NaiveDate,
) -> DashboardSummary<'a> {
    let rows = build_due_list(state, cycles, policy, today, &DueFilters::default());

    let due_of = |pt: ProductType| {
        rows.iter()
            .filter(|r| r.product.product_type == pt && r.report.sample != PriorityFlag::Ok)
            .count()
    };

    DashboardSummary {
        due_concrete: due_of(ProductType::Concrete),
        due_cement: due_of(ProductType::Cement),
        active_trips: state
            .trips
            .iter()
            .filter(|t| t.status == TripStatus::Active)
            .count(),
        lab: lab_counts(state),
        avg_turnaround_days: average_turnaround_days(state),
        top_prioritized: rows.iter().take(10).cloned().collect(),
    }
}
