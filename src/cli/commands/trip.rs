use super::{code_arg, date_arg, ids_arg, opt_date_arg};
use crate::cli::parser::{Commands, TripCommand};
use crate::config::Config;
use crate::core::trip::{
    CreateTripInput, PlannedDuty, SampleTaken, TripChanges, complete_trip, create_trip,
    mark_sample_taken, update_trip, update_trip_status,
};
use crate::core::validation::{validate_completion, validate_trip_plan};
use crate::errors::{AppError, AppResult};
use crate::models::{
    CompleteTripInput, DutyType, LodgingProvider, TransportMode, TripCompletionEntry, TripStatus,
};
use crate::store::AppState;
use crate::store::snapshot::Snapshot;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{color_for_lab_status, color_for_trip_status, paint};
use crate::utils::date::format_date;
use crate::utils::formatting::{bold, money, opt_str, truncate, wrap_text};
use crate::utils::table::Table;
use chrono::NaiveDate;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    let Commands::Trip { action } = cmd else {
        return Ok(());
    };

    match action {
        TripCommand::List { status } => {
            let status = code_arg("status", status.as_deref(), TripStatus::from_code)?;
            let state = Snapshot::load(&cfg.data_file)?;
            print_trip_list(&state, status, &cfg.separator_char);
        }

        TripCommand::Show { id } => {
            let state = Snapshot::load(&cfg.data_file)?;
            print_trip(&state, *id, &cfg.separator_char)?;
        }

        TripCommand::Create {
            name,
            cp,
            assignees,
            duty,
            planned_at,
            status,
            notes,
            planned_by,
            transport,
            plate,
            lodging,
        } => {
            let input = CreateTripInput {
                name: name.clone(),
                planned_at: opt_date_arg(planned_at.as_deref())?,
                status: code_arg("status", status.as_deref(), TripStatus::from_code)?,
                assignee_ids: ids_arg("assignees", assignees)?,
                company_product_ids: ids_arg("company products", cp)?,
                duties: duty.iter().map(|d| parse_duty(d)).collect::<AppResult<_>>()?,
                notes: notes.clone(),
                planned_by: planned_by.clone(),
                transport_mode: code_arg("transport", transport.as_deref(), TransportMode::from_code)?,
                vehicle_plate: plate.clone(),
                lodging_provider: code_arg("lodging", lodging.as_deref(), LodgingProvider::from_code)?,
            };

            let id = Snapshot::with_state(&cfg.data_file, |state| {
                validate_trip_plan(state, &input)?;
                create_trip(state, input)
            })?;
            success(format!("Trip {id} planned."));
        }

        TripCommand::Status { id, status } => {
            let status = code_arg("status", Some(status.as_str()), TripStatus::from_code)?
                .unwrap_or_default();
            Snapshot::with_state(&cfg.data_file, |state| update_trip_status(state, *id, status))?;
            success(format!("Trip {id} is now {}.", status.label()));
        }

        TripCommand::Update {
            id,
            name,
            planned_at,
            notes,
        } => {
            let changes = TripChanges {
                name: name.clone(),
                planned_at: opt_date_arg(planned_at.as_deref())?,
                notes: notes.clone(),
            };
            Snapshot::with_state(&cfg.data_file, |state| update_trip(state, *id, changes))?;
            success(format!("Trip {id} updated."));
        }

        TripCommand::Sample { item, date } => {
            let sampled_at = match date {
                Some(d) => date_arg(d)?,
                None => today.to_string(),
            };
            let inputs: Vec<SampleTaken> = item
                .iter()
                .map(|id| SampleTaken {
                    trip_item_id: *id,
                    sampled_at: sampled_at.clone(),
                })
                .collect();

            Snapshot::with_state(&cfg.data_file, |state| mark_sample_taken(state, &inputs))?;
            success(format!("{} sample(s) recorded on {}.", inputs.len(), sampled_at));
        }

        TripCommand::Complete {
            id,
            file,
            by,
            transport,
            plate,
            km,
            days,
            lodging,
            entry,
        } => {
            let mut input = match file {
                Some(path) => {
                    let content = fs::read_to_string(path)?;
                    serde_yaml::from_str::<CompleteTripInput>(&content).map_err(|e| {
                        AppError::InvalidValue {
                            field: "completion file",
                            value: e.to_string(),
                        }
                    })?
                }
                None => CompleteTripInput::default(),
            };
            input.trip_id = *id;

            if let Some(by) = by {
                input.completed_by_employee_ids = ids_arg("completed by", by)?;
            }
            if let Some(mode) = code_arg("transport", transport.as_deref(), TransportMode::from_code)? {
                input.transport_mode = Some(mode);
            }
            if plate.is_some() {
                input.vehicle_plate = plate.clone();
            }
            if km.is_some() {
                input.total_km = *km;
            }
            if days.is_some() {
                input.total_days = *days;
            }
            if let Some(provider) = code_arg("lodging", lodging.as_deref(), LodgingProvider::from_code)? {
                input.lodging_provider = Some(provider);
            }

            for raw in entry {
                let parsed = parse_entry(raw)?;
                match input.entries.iter_mut().find(|e| e.trip_item_id == parsed.trip_item_id) {
                    Some(existing) => *existing = parsed,
                    None => input.entries.push(parsed),
                }
            }

            let trip_id = *id;
            let total = Snapshot::with_state(&cfg.data_file, |state| {
                prefill_completion(state, &mut input)?;
                validate_completion(state, &input)?;
                let entries = input.entries.len();
                complete_trip(state, input)?;
                Ok(entries)
            })?;
            success(format!("Trip {trip_id} completed with {total} entry(ies)."));
        }
    }

    Ok(())
}

/// Fill what the completion form inherits from the planned trip: transport,
/// plate and lodging, plus an empty entry for every item not listed.
fn prefill_completion(state: &AppState, input: &mut CompleteTripInput) -> AppResult<()> {
    let trip = state
        .trip(input.trip_id)
        .ok_or(AppError::TripNotFound(input.trip_id))?;

    if input.transport_mode.is_none() {
        input.transport_mode = trip.transport_mode;
    }
    if input.vehicle_plate.is_none() {
        input.vehicle_plate = trip.vehicle_plate.clone();
    }
    if input.lodging_provider.is_none() {
        input.lodging_provider = trip.lodging_provider;
    }

    for item in state.items_of_trip(trip.id) {
        if !input.entries.iter().any(|e| e.trip_item_id == item.id) {
            input.entries.push(TripCompletionEntry::new(item.id));
        }
    }
    Ok(())
}

/// Parse `CP=TYPE[:ID+ID...]`, e.g. `3=BOTH:1+2`.
fn parse_duty(raw: &str) -> AppResult<PlannedDuty> {
    let invalid = || AppError::InvalidValue {
        field: "duty",
        value: raw.to_string(),
    };

    let (cp, rest) = raw.split_once('=').ok_or_else(invalid)?;
    let (duty, assignees) = match rest.split_once(':') {
        Some((d, a)) => (d, Some(a)),
        None => (rest, None),
    };

    Ok(PlannedDuty {
        company_product_id: cp.trim().parse().map_err(|_| invalid())?,
        duty_type: Some(DutyType::from_code(duty.trim()).ok_or_else(invalid)?),
        duty_assignee_ids: match assignees {
            Some(a) => plus_ids(a).ok_or_else(invalid)?,
            None => Vec::new(),
        },
    })
}

fn plus_ids(raw: &str) -> Option<Vec<u32>> {
    raw.split('+')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.parse().ok())
        .collect()
}

fn amount(raw: &str, value: &str) -> AppResult<f64> {
    value.trim().parse().map_err(|_| AppError::InvalidValue {
        field: "entry amount",
        value: raw.to_string(),
    })
}

/// Parse `ITEM:key=value,...` into a completion entry.
///
/// Keys: `duty`, `performed`, `inspected`, `no-sample`, `no-inspection`,
/// `code`, `assignees` (ids joined by `+`), and the expenses `lodging`,
/// `transport`, `lunch`, `dinner`, `company`.
fn parse_entry(raw: &str) -> AppResult<TripCompletionEntry> {
    let invalid = || AppError::InvalidValue {
        field: "entry",
        value: raw.to_string(),
    };

    let (item, fields) = raw.split_once(':').unwrap_or((raw, ""));
    let mut entry = TripCompletionEntry::new(item.trim().parse().map_err(|_| invalid())?);

    for field in fields.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let (key, value) = field.split_once('=').unwrap_or((field, ""));
        match key.trim() {
            "duty" => entry.duty_type = Some(DutyType::from_code(value.trim()).ok_or_else(invalid)?),
            "performed" => entry.performed_at = Some(date_arg(value)?),
            "inspected" => entry.inspected_at = Some(date_arg(value)?),
            "no-sample" => entry.sample_not_completed = true,
            "no-inspection" => entry.inspection_not_completed = true,
            "code" => entry.tracking_code = Some(value.trim().to_string()).filter(|c| !c.is_empty()),
            "assignees" => entry.duty_assignee_ids = plus_ids(value).ok_or_else(invalid)?,
            "lodging" => entry.lodging_payment_amount = Some(amount(raw, value)?),
            "transport" => entry.transport_expense = Some(amount(raw, value)?),
            "lunch" => entry.meal_lunch_expense = Some(amount(raw, value)?),
            "dinner" => entry.meal_dinner_expense = Some(amount(raw, value)?),
            "company" => entry.company_expense = Some(amount(raw, value)?),
            _ => return Err(invalid()),
        }
    }

    Ok(entry)
}

fn print_trip_list(state: &AppState, status: Option<TripStatus>, separator: &str) {
    header("Trips");
    let mut table = Table::new(&["ID", "NAME", "PLANNED", "STATUS", "ITEMS", "TEAM"]).with_separator(separator);
    let maps = state.maps();

    for trip in state.trips.iter().filter(|t| status.is_none_or(|s| t.status == s)) {
        table.add_row(vec![
            trip.id.to_string(),
            truncate(&trip.display_name(), 32),
            format_date(trip.planned_at.as_deref()),
            paint(trip.status.label(), color_for_trip_status(trip.status)),
            state.items_of_trip(trip.id).count().to_string(),
            truncate(&maps.employee_names(&trip.assignee_ids), 40),
        ]);
    }

    if table.is_empty() {
        info("No trips found.");
    } else {
        print!("{}", table.render());
    }
}

fn print_trip(state: &AppState, trip_id: u32, separator: &str) -> AppResult<()> {
    let trip = state.trip(trip_id).ok_or(AppError::TripNotFound(trip_id))?;
    let maps = state.maps();

    header(trip.display_name());
    println!("{:<12} {}", "Status", paint(trip.status.label(), color_for_trip_status(trip.status)));
    println!("{:<12} {}", "Planned", format_date(trip.planned_at.as_deref()));
    println!("{:<12} {}", "Planned by", opt_str(trip.planned_by.as_deref()));
    println!("{:<12} {}", "Team", maps.employee_names(&trip.assignee_ids));
    println!(
        "{:<12} {} {}",
        "Transport",
        trip.transport_mode.map(|m| m.label()).unwrap_or("-"),
        opt_str(trip.vehicle_plate.as_deref())
    );
    println!(
        "{:<12} {}",
        "Lodging",
        trip.lodging_provider.map(|l| l.code()).unwrap_or("-")
    );
    println!(
        "{:<12} {}",
        "Notes",
        wrap_text(&opt_str(trip.notes.as_deref()), 70, 13)
    );

    println!("\n{}", bold("Items"));
    let mut table = Table::new(&[
        "ITEM", "COMPANY", "PRODUCT", "DUTY", "ASSIGNEES", "SAMPLED", "LAB", "ENTRY CODE",
    ])
    .with_separator(separator);

    for item in state.items_of_trip(trip.id) {
        let cp = maps.company_product_of(item);
        table.add_row(vec![
            item.id.to_string(),
            cp.map(|cp| truncate(&maps.company_name(cp), 28)).unwrap_or_else(|| "-".into()),
            cp.map(|cp| truncate(&maps.product_name(cp), 24)).unwrap_or_else(|| "-".into()),
            item.duty_type.label().to_string(),
            maps.employee_names(&item.duty_assignee_ids),
            format_date(item.sampled_at.as_deref()),
            paint(
                item.lab_status.map(|s| s.label()).unwrap_or("-"),
                color_for_lab_status(item.lab_status),
            ),
            opt_str(item.lab_entry_code.as_deref()),
        ]);
    }
    print!("{}", table.render());

    if let Some(completion) = state.completion_for(trip.id) {
        println!("\n{}", bold("Completion"));
        println!("{:<12} {}", "Completed", format_date(Some(completion.created_at.as_str())));
        println!("{:<12} {}", "By", maps.employee_names(&completion.completed_by_employee_ids));
        println!(
            "{:<12} {} km, {} day(s)",
            "Distance",
            completion.total_km.map(|k| format!("{k:.0}")).unwrap_or_else(|| "-".into()),
            completion.total_days.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
        );

        let mut entries = Table::new(&["ITEM", "DUTY", "SAMPLE", "INSPECTION", "CODE", "EXPENSES"])
            .with_separator(separator);
        for e in &completion.entries {
            entries.add_row(vec![
                e.trip_item_id.to_string(),
                e.duty_type.map(|d| d.label()).unwrap_or("-").to_string(),
                if e.sample_not_completed {
                    "not completed".into()
                } else {
                    format_date(e.performed_at.as_deref())
                },
                if e.inspection_not_completed {
                    "not completed".into()
                } else {
                    format_date(e.inspected_at.as_deref())
                },
                opt_str(e.tracking_code.as_deref()),
                money(Some(e.total_expense())),
            ]);
        }
        print!("{}", entries.render());
        println!("{:<12} {}", "Total", money(Some(completion.total_expense())));
    }

    Ok(())
}
