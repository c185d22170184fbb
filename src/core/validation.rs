//! Checks performed before a trip is planned or completed.

use crate::core::trip::CreateTripInput;
use crate::errors::{AppError, AppResult};
use crate::models::{CompleteTripInput, DutyType, Employee, ProductType, TransportMode};
use crate::store::AppState;
use std::collections::BTreeSet;

/// Product types in `required` that no employee in `team` is skilled for.
pub fn missing_skills(team: &[&Employee], required: &[ProductType]) -> Vec<ProductType> {
    let covered: BTreeSet<ProductType> = team.iter().flat_map(|e| e.skills.iter().copied()).collect();
    let mut missing: Vec<ProductType> = required
        .iter()
        .copied()
        .filter(|p| !covered.contains(p))
        .collect();
    missing.sort();
    missing.dedup();
    missing
}

pub fn has_skill_coverage(team: &[&Employee], required: &[ProductType]) -> bool {
    missing_skills(team, required).is_empty()
}

/// Every problem found in a trip plan; empty when it can be created.
pub fn trip_plan_problems(state: &AppState, input: &CreateTripInput) -> Vec<String> {
    let mut problems = Vec::new();

    if input.company_product_ids.is_empty() {
        problems.push("select at least one company product".to_string());
    }
    if input.assignee_ids.is_empty() {
        problems.push("assign at least one employee".to_string());
    }

    let maps = state.maps();
    let mut team = Vec::new();
    for id in &input.assignee_ids {
        match maps.employees.get(id) {
            Some(e) if !e.is_available() => {
                problems.push(format!("{} is already assigned to an open trip", e.name))
            }
            Some(e) => team.push(*e),
            None => problems.push(format!("unknown employee {id}")),
        }
    }

    let required: Vec<ProductType> = input
        .company_product_ids
        .iter()
        .filter_map(|id| maps.company_products.get(id))
        .filter_map(|cp| maps.product_of(cp))
        .map(|p| p.product_type)
        .collect();

    if !team.is_empty() {
        let missing = missing_skills(&team, &required);
        if !missing.is_empty() {
            let labels: Vec<&str> = missing.iter().map(|p| p.label()).collect();
            problems.push(format!("no assignee is skilled for: {}", labels.join(", ")));
        }
    }

    for duty in &input.duties {
        if !input.company_product_ids.contains(&duty.company_product_id) {
            problems.push(format!(
                "duty given for company product {} which is not on the trip",
                duty.company_product_id
            ));
        }
        if let Some(stray) = duty
            .duty_assignee_ids
            .iter()
            .find(|id| !input.assignee_ids.contains(id))
        {
            problems.push(format!(
                "duty assignee {} of company product {} is not on the trip",
                stray, duty.company_product_id
            ));
        }
    }

    problems
}

pub fn validate_trip_plan(state: &AppState, input: &CreateTripInput) -> AppResult<()> {
    let problems = trip_plan_problems(state, input);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

/// Every problem found in a completion form; empty when it can be saved.
pub fn completion_problems(state: &AppState, input: &CompleteTripInput) -> Vec<String> {
    let mut problems = Vec::new();

    if input.completed_by_employee_ids.is_empty() {
        problems.push("select who completed the trip".to_string());
    }

    match input.transport_mode {
        None => problems.push("transport mode is required".to_string()),
        Some(mode) => {
            if mode == TransportMode::CompanyVehicle
                && input.vehicle_plate.as_deref().is_none_or(|p| p.trim().is_empty())
            {
                problems.push("vehicle plate is required for a company vehicle".to_string());
            }
            if input.total_km.is_none_or(|km| km <= 0.0) || input.total_days.is_none_or(|d| d == 0) {
                problems.push("total km and total days are required".to_string());
            }
        }
    }

    if input.lodging_provider.is_none() {
        problems.push("lodging provider is required".to_string());
    }

    for entry in &input.entries {
        let duty = entry
            .duty_type
            .or_else(|| state.trip_item(entry.trip_item_id).map(|i| i.duty_type))
            .unwrap_or(DutyType::Sample);

        if duty.requires_sample() && !entry.sample_not_completed && entry.performed_at.is_none() {
            problems.push(format!(
                "item {}: sample date is required (or mark the sample as not completed)",
                entry.trip_item_id
            ));
        }
        if duty.requires_inspection() && !entry.inspection_not_completed && entry.inspected_at.is_none()
        {
            problems.push(format!(
                "item {}: inspection date is required (or mark the inspection as not completed)",
                entry.trip_item_id
            ));
        }
    }

    problems
}

pub fn validate_completion(state: &AppState, input: &CompleteTripInput) -> AppResult<()> {
    let problems = completion_problems(state, input);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}
