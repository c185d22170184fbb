//! Trip lifecycle: planning, status changes, sampling and completion.

use crate::core::samples::generate_lab_entry_code;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CompleteTripInput, DutyAssignment, DutyType, Employee, EmployeeStatus, LabStatus,
    LodgingProvider, TransportMode, Trip, TripCompletion, TripCompletionEntry, TripItem,
    TripStatus,
};
use crate::store::AppState;
use crate::store::log::ttlog;
use crate::utils::date::now_iso;
use std::collections::{BTreeMap, HashSet};

/// Duty requested for one company product when planning a trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannedDuty {
    pub company_product_id: u32,
    pub duty_type: Option<DutyType>,
    pub duty_assignee_ids: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTripInput {
    pub name: Option<String>,
    pub planned_at: Option<String>,
    pub status: Option<TripStatus>,
    pub assignee_ids: Vec<u32>,
    pub company_product_ids: Vec<u32>,
    pub duties: Vec<PlannedDuty>,
    pub notes: Option<String>,
    pub planned_by: Option<String>,
    pub transport_mode: Option<TransportMode>,
    pub vehicle_plate: Option<String>,
    pub lodging_provider: Option<LodgingProvider>,
}

/// Editable trip fields; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripChanges {
    pub name: Option<String>,
    pub planned_at: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleTaken {
    pub trip_item_id: u32,
    pub sampled_at: String,
}

/// An employee is busy iff assigned to a planned or active trip.
pub fn recalc_employee_statuses(employees: &mut [Employee], trips: &[Trip]) {
    let busy: HashSet<u32> = trips
        .iter()
        .filter(|t| t.status.is_open())
        .flat_map(|t| t.assignee_ids.iter().copied())
        .collect();

    for employee in employees.iter_mut() {
        employee.status = if busy.contains(&employee.id) {
            EmployeeStatus::Busy
        } else {
            EmployeeStatus::Available
        };
    }
}

fn refresh_employees(state: &mut AppState) {
    recalc_employee_statuses(&mut state.employees, &state.trips);
}

fn trip_mut(state: &mut AppState, trip_id: u32) -> AppResult<&mut Trip> {
    state
        .trips
        .iter_mut()
        .find(|t| t.id == trip_id)
        .ok_or(AppError::TripNotFound(trip_id))
}

/// Plan a new trip with one item per selected company product.
///
/// Status defaults to `ACTIVE` and `planned_at` to now. Duties default to
/// `NUMUNE` carried out by every trip assignee.
pub fn create_trip(state: &mut AppState, input: CreateTripInput) -> AppResult<u32> {
    for cp_id in &input.company_product_ids {
        if state.company_product(*cp_id).is_none() {
            return Err(AppError::CompanyProductNotFound(*cp_id));
        }
    }

    let trip_id = state.next_trip_id();

    let mut duty_assignments = BTreeMap::new();
    for cp_id in &input.company_product_ids {
        let planned = input.duties.iter().find(|d| d.company_product_id == *cp_id);
        let duty_type = planned.and_then(|d| d.duty_type).unwrap_or_default();
        let duty_assignee_ids = match planned {
            Some(d) if !d.duty_assignee_ids.is_empty() => d.duty_assignee_ids.clone(),
            _ => input.assignee_ids.clone(),
        };
        duty_assignments.insert(
            *cp_id,
            DutyAssignment {
                duty_type,
                duty_assignee_ids,
            },
        );
    }

    let mut next_item_id = state.next_trip_item_id();
    for cp_id in &input.company_product_ids {
        let Some(assignment) = duty_assignments.get(cp_id) else {
            continue;
        };
        state.trip_items.push(TripItem {
            duty_assignee_ids: assignment.duty_assignee_ids.clone(),
            ..TripItem::new(next_item_id, trip_id, *cp_id, assignment.duty_type)
        });
        next_item_id += 1;
    }

    let trip = Trip {
        id: trip_id,
        name: input.name,
        planned_at: Some(input.planned_at.unwrap_or_else(now_iso)),
        status: input.status.unwrap_or(TripStatus::Active),
        assignee_ids: input.assignee_ids,
        notes: input.notes,
        planned_by: input.planned_by,
        transport_mode: input.transport_mode,
        vehicle_plate: input.vehicle_plate,
        lodging_provider: input.lodging_provider,
        duty_assignments,
    };

    let msg = format!(
        "Planned {} with {} item(s), status {}",
        trip.display_name(),
        input.company_product_ids.len(),
        trip.status.code()
    );
    state.trips.push(trip);
    refresh_employees(state);
    ttlog(state, "trip_create", &format!("trip {trip_id}"), &msg);

    Ok(trip_id)
}

/// Move a trip to any status. No transition table is enforced.
pub fn update_trip_status(state: &mut AppState, trip_id: u32, status: TripStatus) -> AppResult<()> {
    let trip = trip_mut(state, trip_id)?;
    let previous = trip.status;
    trip.status = status;

    refresh_employees(state);
    ttlog(
        state,
        "trip_status",
        &format!("trip {trip_id}"),
        &format!("{} -> {}", previous.code(), status.code()),
    );
    Ok(())
}

pub fn update_trip(state: &mut AppState, trip_id: u32, changes: TripChanges) -> AppResult<()> {
    let trip = trip_mut(state, trip_id)?;
    let mut touched = Vec::new();

    if let Some(name) = changes.name {
        trip.name = Some(name);
        touched.push("name");
    }
    if let Some(planned_at) = changes.planned_at {
        trip.planned_at = Some(planned_at);
        touched.push("plannedAt");
    }
    if let Some(notes) = changes.notes {
        trip.notes = Some(notes);
        touched.push("notes");
    }

    if !touched.is_empty() {
        ttlog(
            state,
            "trip_edit",
            &format!("trip {trip_id}"),
            &format!("Updated {}", touched.join(", ")),
        );
    }
    Ok(())
}

/// Record samples as taken and push the date to each company product.
pub fn mark_sample_taken(state: &mut AppState, inputs: &[SampleTaken]) -> AppResult<()> {
    for input in inputs {
        let item = state
            .trip_items
            .iter_mut()
            .find(|i| i.id == input.trip_item_id)
            .ok_or(AppError::TripItemNotFound(input.trip_item_id))?;
        item.sampled = true;
        item.sampled_at = Some(input.sampled_at.clone());
        let cp_id = item.company_product_id;

        if let Some(cp) = state.company_products.iter_mut().find(|cp| cp.id == cp_id) {
            cp.last_sample_date = Some(input.sampled_at.clone());
        }

        ttlog(
            state,
            "sample",
            &format!("item {}", input.trip_item_id),
            &format!("Sample taken on {}", input.sampled_at),
        );
    }
    Ok(())
}

/// Resolve an entry's duty, assignees, dates and tracking code.
fn normalize_entry(
    state: &AppState,
    trip: &Trip,
    item: &TripItem,
    entry: &TripCompletionEntry,
) -> TripCompletionEntry {
    let assignment = trip.duty_assignments.get(&item.company_product_id);
    let duty_type = entry.duty_type.unwrap_or(item.duty_type);

    let duty_assignee_ids = if !entry.duty_assignee_ids.is_empty() {
        entry.duty_assignee_ids.clone()
    } else if !item.duty_assignee_ids.is_empty() {
        item.duty_assignee_ids.clone()
    } else {
        assignment
            .map(|a| a.duty_assignee_ids.clone())
            .unwrap_or_default()
    };

    let samples_taken =
        duty_type.requires_sample() && !entry.sample_not_completed && entry.performed_at.is_some();

    let tracking_code = if samples_taken {
        entry
            .tracking_code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| {
                let product_code = state
                    .company_product(item.company_product_id)
                    .and_then(|cp| cp.product_code.as_deref());
                generate_lab_entry_code(
                    product_code,
                    entry.performed_at.as_deref(),
                    &state.trip_items,
                    Some(item.id),
                )
            })
    } else {
        None
    };

    TripCompletionEntry {
        duty_type: Some(duty_type),
        duty_assignee_ids,
        tracking_code,
        performed_at: if entry.sample_not_completed {
            None
        } else {
            entry.performed_at.clone()
        },
        inspected_at: if entry.inspection_not_completed {
            None
        } else {
            entry.inspected_at.clone()
        },
        ..entry.clone()
    }
}

/// Finalize a trip.
///
/// Replaces any earlier completion of the same trip, writes sample and
/// inspection dates back to trip items and company products, assigns lab
/// entry codes and forces the trip to `COMPLETED`.
pub fn complete_trip(state: &mut AppState, input: CompleteTripInput) -> AppResult<()> {
    let trip_id = input.trip_id;
    let trip = state
        .trip(trip_id)
        .cloned()
        .ok_or(AppError::TripNotFound(trip_id))?;

    let mut entries = Vec::with_capacity(input.entries.len());
    for entry in &input.entries {
        let idx = state
            .trip_items
            .iter()
            .position(|i| i.id == entry.trip_item_id)
            .ok_or(AppError::TripItemNotFound(entry.trip_item_id))?;

        let normalized = normalize_entry(state, &trip, &state.trip_items[idx], entry);

        // Written immediately so later entries in the same batch see the code.
        if let Some(code) = &normalized.tracking_code {
            state.trip_items[idx].lab_entry_code = Some(code.clone());
        }
        entries.push(normalized);
    }

    for entry in &entries {
        let duty = entry.duty_type.unwrap_or_default();
        let Some(item) = state.trip_items.iter_mut().find(|i| i.id == entry.trip_item_id) else {
            continue;
        };
        let cp_id = item.company_product_id;

        let sampled_at = entry.performed_at.clone().filter(|_| duty.requires_sample());
        if let Some(performed_at) = &sampled_at {
            item.sampled = true;
            item.sampled_at = Some(performed_at.clone());
            item.lab_status.get_or_insert(LabStatus::Pending);
        }

        let inspected_at = entry.inspected_at.clone().filter(|_| duty.requires_inspection());

        if let Some(cp) = state.company_products.iter_mut().find(|cp| cp.id == cp_id) {
            if let Some(date) = sampled_at {
                cp.last_sample_date = Some(date);
            }
            if let Some(date) = inspected_at {
                cp.last_inspection_date = Some(date);
            }
        }
    }

    let entry_count = entries.len();
    let completion = TripCompletion::from_input(input, entries, now_iso());
    let total = completion.total_expense();

    match state.trip_completions.iter_mut().find(|c| c.trip_id == trip_id) {
        Some(existing) => *existing = completion,
        None => state.trip_completions.push(completion),
    }

    trip_mut(state, trip_id)?.status = TripStatus::Completed;
    refresh_employees(state);

    ttlog(
        state,
        "trip_complete",
        &format!("trip {trip_id}"),
        &format!("Completed with {entry_count} entry(ies), expenses {total:.2}"),
    );
    Ok(())
}
