use labtrack::core::trip::{
    CreateTripInput, PlannedDuty, SampleTaken, TripChanges, complete_trip, create_trip,
    mark_sample_taken, update_trip, update_trip_status,
};
use labtrack::core::validation::{
    completion_problems, has_skill_coverage, trip_plan_problems, validate_trip_plan,
};
use labtrack::errors::AppError;
use labtrack::models::{
    CompleteTripInput, DutyType, EmployeeStatus, LabStatus, LodgingProvider, ProductType,
    TransportMode, TripCompletionEntry, TripStatus,
};
use labtrack::store::AppState;
use labtrack::store::seed::seed;

fn status_of(state: &AppState, employee_id: u32) -> EmployeeStatus {
    state
        .employees
        .iter()
        .find(|e| e.id == employee_id)
        .map(|e| e.status)
        .expect("seed employee")
}

/// Concrete products 1 and 6 with Ayşe (concrete, cement) and Mert (concrete).
fn plan(state: &mut AppState) -> u32 {
    let input = CreateTripInput {
        name: Some("Marmara tour".into()),
        planned_at: Some("2025-09-20".into()),
        assignee_ids: vec![1, 2],
        company_product_ids: vec![1, 6],
        duties: vec![PlannedDuty {
            company_product_id: 6,
            duty_type: Some(DutyType::Both),
            duty_assignee_ids: vec![2],
        }],
        ..Default::default()
    };
    validate_trip_plan(state, &input).expect("valid plan");
    create_trip(state, input).expect("trip created")
}

fn completion_input(trip_id: u32, entries: Vec<TripCompletionEntry>) -> CompleteTripInput {
    CompleteTripInput {
        trip_id,
        completed_by_employee_ids: vec![1, 2],
        transport_mode: Some(TransportMode::CompanyVehicle),
        vehicle_plate: Some("34 ABC 123".into()),
        total_km: Some(420.0),
        total_days: Some(2),
        lodging_provider: Some(LodgingProvider::Cpc),
        entries,
    }
}

#[test]
fn test_create_trip_builds_items_and_marks_team_busy() {
    let mut state = seed();
    let trip_id = plan(&mut state);

    // seed holds orphan items of trips 1 and 2
    assert_eq!(trip_id, 3);

    let trip = state.trip(trip_id).expect("trip");
    assert_eq!(trip.status, TripStatus::Active);
    assert_eq!(trip.duty_assignments.len(), 2);

    let items: Vec<_> = state.items_of_trip(trip_id).collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, 6);
    assert_eq!(items[0].duty_type, DutyType::Sample);
    assert_eq!(items[0].duty_assignee_ids, vec![1, 2]);
    assert_eq!(items[1].duty_type, DutyType::Both);
    assert_eq!(items[1].duty_assignee_ids, vec![2]);
    assert_eq!(items[1].lab_status, Some(LabStatus::Pending));

    assert_eq!(status_of(&state, 1), EmployeeStatus::Busy);
    assert_eq!(status_of(&state, 2), EmployeeStatus::Busy);
    assert_eq!(status_of(&state, 3), EmployeeStatus::Available);

    assert!(state.log.iter().any(|l| l.operation == "trip_create"));
}

#[test]
fn test_create_trip_rejects_unknown_company_product() {
    let mut state = seed();
    let input = CreateTripInput {
        assignee_ids: vec![1],
        company_product_ids: vec![1, 999],
        ..Default::default()
    };

    assert!(matches!(
        create_trip(&mut state, input),
        Err(AppError::CompanyProductNotFound(999))
    ));
    assert!(state.trips.is_empty());
}

#[test]
fn test_plan_validation_rules() {
    let mut state = seed();

    let empty = CreateTripInput::default();
    let problems = trip_plan_problems(&state, &empty);
    assert!(problems.iter().any(|p| p.contains("company product")));
    assert!(problems.iter().any(|p| p.contains("at least one employee")));

    // fly ash (cp 7) needs Emir; Mert only knows concrete
    let uncovered = CreateTripInput {
        assignee_ids: vec![2],
        company_product_ids: vec![7],
        ..Default::default()
    };
    assert!(validate_trip_plan(&state, &uncovered).is_err());

    let team: Vec<_> = state.employees.iter().filter(|e| e.id == 4).collect();
    assert!(has_skill_coverage(&team, &[ProductType::FlyAsh, ProductType::Concrete]));

    // busy employees cannot be planned again
    plan(&mut state);
    let again = CreateTripInput {
        assignee_ids: vec![1],
        company_product_ids: vec![3],
        ..Default::default()
    };
    assert!(validate_trip_plan(&state, &again).is_err());
}

#[test]
fn test_status_changes_recompute_employee_status() {
    let mut state = seed();
    let trip_id = plan(&mut state);

    update_trip_status(&mut state, trip_id, TripStatus::Cancelled).expect("status");
    assert_eq!(status_of(&state, 1), EmployeeStatus::Available);

    update_trip_status(&mut state, trip_id, TripStatus::Planned).expect("status");
    assert_eq!(status_of(&state, 1), EmployeeStatus::Busy);

    assert!(matches!(
        update_trip_status(&mut state, 42, TripStatus::Active),
        Err(AppError::TripNotFound(42))
    ));
}

#[test]
fn test_update_trip_and_mark_samples() {
    let mut state = seed();
    let trip_id = plan(&mut state);

    update_trip(
        &mut state,
        trip_id,
        TripChanges {
            notes: Some("Call the plant the day before".into()),
            ..Default::default()
        },
    )
    .expect("update");
    let trip = state.trip(trip_id).expect("trip");
    assert_eq!(trip.notes.as_deref(), Some("Call the plant the day before"));
    assert_eq!(trip.name.as_deref(), Some("Marmara tour"));

    mark_sample_taken(
        &mut state,
        &[SampleTaken {
            trip_item_id: 6,
            sampled_at: "2025-09-21".into(),
        }],
    )
    .expect("sample");
    let item = state.trip_item(6).expect("item");
    assert!(item.sampled);
    assert_eq!(
        state.company_product(1).and_then(|cp| cp.last_sample_date.as_deref()),
        Some("2025-09-21")
    );

    assert!(mark_sample_taken(
        &mut state,
        &[SampleTaken {
            trip_item_id: 404,
            sampled_at: "2025-09-21".into(),
        }],
    )
    .is_err());
}

#[test]
fn test_complete_trip_writes_dates_codes_and_frees_team() {
    let mut state = seed();
    let trip_id = plan(&mut state);

    let entries = vec![
        TripCompletionEntry {
            performed_at: Some("2025-09-21".into()),
            meal_lunch_expense: Some(150.0),
            ..TripCompletionEntry::new(6)
        },
        TripCompletionEntry {
            performed_at: Some("2025-09-22".into()),
            inspected_at: Some("2025-09-22".into()),
            lodging_payment_amount: Some(900.0),
            ..TripCompletionEntry::new(7)
        },
    ];
    let input = completion_input(trip_id, entries);
    assert!(completion_problems(&state, &input).is_empty());

    complete_trip(&mut state, input).expect("complete");

    assert_eq!(state.trip(trip_id).map(|t| t.status), Some(TripStatus::Completed));
    assert_eq!(status_of(&state, 1), EmployeeStatus::Available);
    assert_eq!(status_of(&state, 2), EmployeeStatus::Available);

    let item = state.trip_item(6).expect("item");
    assert!(item.sampled);
    assert_eq!(item.lab_entry_code.as_deref(), Some("CPC-1040.Ç1.T1.0925"));

    let cp6 = state.company_product(6).expect("cp");
    assert_eq!(cp6.last_sample_date.as_deref(), Some("2025-09-22"));
    assert_eq!(cp6.last_inspection_date.as_deref(), Some("2025-09-22"));

    let completion = state.completion_for(trip_id).expect("completion");
    assert_eq!(completion.entries.len(), 2);
    assert_eq!(completion.entries[1].duty_type, Some(DutyType::Both));
    assert_eq!(completion.entries[1].duty_assignee_ids, vec![2]);
    assert!((completion.total_expense() - 1050.0).abs() < f64::EPSILON);
}

#[test]
fn test_complete_twice_replaces_the_completion() {
    let mut state = seed();
    let trip_id = plan(&mut state);

    let first = completion_input(
        trip_id,
        vec![TripCompletionEntry {
            sample_not_completed: true,
            performed_at: Some("2025-09-21".into()),
            ..TripCompletionEntry::new(6)
        }],
    );
    complete_trip(&mut state, first).expect("complete");

    let entry = &state.completion_for(trip_id).expect("completion").entries[0];
    assert_eq!(entry.performed_at, None);
    assert_eq!(entry.tracking_code, None);
    assert_eq!(state.company_product(1).and_then(|cp| cp.last_sample_date.as_deref()), Some("2025-07-12"));

    let second = completion_input(
        trip_id,
        vec![TripCompletionEntry {
            performed_at: Some("2025-09-23".into()),
            ..TripCompletionEntry::new(6)
        }],
    );
    complete_trip(&mut state, second).expect("complete again");

    assert_eq!(state.trip_completions.len(), 1);
    assert_eq!(
        state.completion_for(trip_id).expect("completion").entries[0].performed_at.as_deref(),
        Some("2025-09-23")
    );
}

#[test]
fn test_completion_validation_rules() {
    let mut state = seed();
    let trip_id = plan(&mut state);

    let mut input = completion_input(trip_id, vec![TripCompletionEntry::new(6), TripCompletionEntry::new(7)]);
    input.vehicle_plate = None;
    input.completed_by_employee_ids.clear();
    input.lodging_provider = None;

    let problems = completion_problems(&state, &input);
    assert!(problems.iter().any(|p| p.contains("completed")));
    assert!(problems.iter().any(|p| p.contains("plate")));
    assert!(problems.iter().any(|p| p.contains("lodging")));
    assert!(problems.iter().any(|p| p.contains("item 6") && p.contains("sample")));
    assert!(problems.iter().any(|p| p.contains("item 7") && p.contains("inspection")));

    input.transport_mode = Some(TransportMode::Bus);
    input.total_km = None;
    let problems = completion_problems(&state, &input);
    assert!(problems.iter().any(|p| p.contains("km")));
    assert!(!problems.iter().any(|p| p.contains("plate")));
}

#[test]
fn test_codes_stay_unique_within_one_completion() {
    let mut state = seed();
    // cp 1 twice on the same trip
    let input = CreateTripInput {
        assignee_ids: vec![1],
        company_product_ids: vec![1, 2],
        ..Default::default()
    };
    let trip_id = create_trip(&mut state, input).expect("trip");

    if let Some(cp) = state.company_products.iter_mut().find(|cp| cp.id == 2) {
        cp.product_code = Some("CPC-1040.Ç1".into());
    }

    let entries = vec![
        TripCompletionEntry {
            performed_at: Some("2025-09-21".into()),
            ..TripCompletionEntry::new(6)
        },
        TripCompletionEntry {
            performed_at: Some("2025-09-21".into()),
            ..TripCompletionEntry::new(7)
        },
    ];
    complete_trip(&mut state, completion_input(trip_id, entries)).expect("complete");

    assert_eq!(state.trip_item(6).and_then(|i| i.lab_entry_code.as_deref()), Some("CPC-1040.Ç1.T1.0925"));
    assert_eq!(state.trip_item(7).and_then(|i| i.lab_entry_code.as_deref()), Some("CPC-1040.Ç1.T2.0925"));
}

#[test]
fn test_completion_keeps_employees_busy_on_other_open_trips() {
    let mut state = seed();
    let first = plan(&mut state);
    let second = create_trip(
        &mut state,
        CreateTripInput {
            name: Some("Bursa follow-up".into()),
            assignee_ids: vec![1],
            company_product_ids: vec![3],
            ..Default::default()
        },
    )
    .expect("second trip");

    let entries: Vec<TripCompletionEntry> = state
        .items_of_trip(first)
        .map(|item| TripCompletionEntry {
            performed_at: Some("2025-09-21".into()),
            inspected_at: Some("2025-09-21".into()),
            ..TripCompletionEntry::new(item.id)
        })
        .collect();
    complete_trip(&mut state, completion_input(first, entries)).expect("complete");

    // Ayşe is still on the second trip, Mert is free
    assert_eq!(status_of(&state, 1), EmployeeStatus::Busy);
    assert_eq!(status_of(&state, 2), EmployeeStatus::Available);

    update_trip_status(&mut state, second, TripStatus::Cancelled).expect("cancel");
    assert_eq!(status_of(&state, 1), EmployeeStatus::Available);
}
