use crate::cli::parser::{Commands, LabCommand};
use crate::config::Config;
use crate::core::lab::{
    LabResultsInput, SendToLabRequest, admin_inbox, approve_lab_form, decode_document,
    lab_processing_queue, read_document, request_revision, samples_ready_to_ship, send_to_lab,
    standard_of, submit_lab_results,
};
use crate::core::lab_fields::{fields_for, label_for};
use crate::errors::{AppError, AppResult};
use crate::models::{LabShipmentDetails, TripItem};
use crate::store::snapshot::Snapshot;
use crate::store::{AppState, EntityMaps};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{color_for_lab_status, paint};
use crate::utils::date::{format_date, format_naive};
use crate::utils::formatting::{bold, italic, opt_str, truncate, wrap_text};
use crate::utils::table::Table;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// `now` is the timestamp recorded on shipments.
pub fn handle(cmd: &Commands, cfg: &Config, now: &str) -> AppResult<()> {
    let Commands::Lab { action } = cmd else {
        return Ok(());
    };

    match action {
        LabCommand::Samples => {
            let state = Snapshot::load(&cfg.data_file)?;
            let maps = state.maps();

            header("Samples ready to ship");
            let mut table = Table::new(&["ITEM", "TRIP", "COMPANY", "PRODUCT", "SAMPLED", "ENTRY CODE"])
                .with_separator(&cfg.separator_char);
            for row in samples_ready_to_ship(&state) {
                let (company, product) = item_names(&maps, state.trip_item(row.trip_item_id));
                table.add_row(vec![
                    row.trip_item_id.to_string(),
                    row.trip_id.to_string(),
                    company,
                    product,
                    format_date(Some(row.performed_at.as_str())),
                    opt_str(row.tracking_code.as_deref()),
                ]);
            }
            print_or_empty(&table, "No samples waiting for shipment.");
        }

        LabCommand::Send {
            item,
            lab,
            production_date,
            last_sale_date,
            storage,
            seal,
            foreign_matter,
            weight,
        } => {
            let request = SendToLabRequest {
                trip_item_id: *item,
                lab_id: *lab,
                shipment: LabShipmentDetails {
                    production_date: super::date_arg(production_date)?,
                    last_sale_date: super::date_arg(last_sale_date)?,
                    storage: storage.clone(),
                    seal_no: seal.clone(),
                    foreign_matter: foreign_matter.clone(),
                    weight: weight.clone(),
                },
            };

            let code = Snapshot::with_state(&cfg.data_file, |state| send_to_lab(state, request, now))?;
            success(format!("Trip item {item} sent to the laboratory as {code}."));
        }

        LabCommand::Queue => {
            let state = Snapshot::load(&cfg.data_file)?;
            let maps = state.maps();

            header("At the laboratory");
            let mut table = Table::new(&["ITEM", "COMPANY", "PRODUCT", "LAB", "ENTRY CODE", "SENT", "EXPECTED", "STATUS"])
                .with_separator(&cfg.separator_char);
            for entry in lab_processing_queue(&state, cfg.lab_turnaround_days) {
                let (company, product) = item_names(&maps, Some(entry.item));
                table.add_row(vec![
                    entry.item.id.to_string(),
                    company,
                    product,
                    maps.lab_name(entry.item.lab_assigned_lab_id),
                    opt_str(entry.item.lab_entry_code.as_deref()),
                    format_date(entry.sent_at.as_deref()),
                    format_naive(entry.expected_return),
                    lab_status_cell(entry.item),
                ]);
            }
            print_or_empty(&table, "No samples at the laboratory.");
        }

        LabCommand::Fill {
            item,
            value,
            notes,
            doc,
        } => {
            let mut data = BTreeMap::new();
            for pair in value {
                let (key, val) = pair.split_once('=').ok_or_else(|| AppError::InvalidValue {
                    field: "lab value",
                    value: pair.clone(),
                })?;
                data.insert(key.trim().to_string(), val.trim().to_string());
            }

            let documents = doc
                .iter()
                .map(|p| read_document(Path::new(p), cfg.max_document_size))
                .collect::<AppResult<Vec<_>>>()?;
            let attached = documents.len();

            Snapshot::with_state(&cfg.data_file, |state| {
                submit_lab_results(
                    state,
                    LabResultsInput {
                        trip_item_id: *item,
                        data,
                        lab_notes: notes.clone(),
                        documents,
                        default_standard: Some(cfg.default_standard.clone()),
                    },
                )
            })?;
            success(format!(
                "Results for trip item {item} submitted for confirmation ({attached} document(s) attached)."
            ));
        }

        LabCommand::Inbox => {
            let state = Snapshot::load(&cfg.data_file)?;
            let maps = state.maps();

            header("Lab results inbox");
            let mut table = Table::new(&["ITEM", "COMPANY", "PRODUCT", "ENTRY CODE", "UPDATED", "STATUS"])
                .with_separator(&cfg.separator_char);
            for item in admin_inbox(&state) {
                let (company, product) = item_names(&maps, Some(item));
                let updated = state.lab_form_for(item.id).and_then(|f| f.updated_at.as_deref());
                table.add_row(vec![
                    item.id.to_string(),
                    company,
                    product,
                    opt_str(item.lab_entry_code.as_deref()),
                    format_date(updated),
                    lab_status_cell(item),
                ]);
            }
            print_or_empty(&table, "No results waiting for review.");
        }

        LabCommand::Approve { item } => {
            Snapshot::with_state(&cfg.data_file, |state| approve_lab_form(state, *item))?;
            success(format!("Results for trip item {item} approved."));
        }

        LabCommand::Revise { item, note } => {
            Snapshot::with_state(&cfg.data_file, |state| request_revision(state, *item, note))?;
            success(format!("Results for trip item {item} sent back for revision."));
        }

        LabCommand::Show { item, extract } => {
            let state = Snapshot::load(&cfg.data_file)?;
            print_form(&state, *item)?;

            if let Some(dir) = extract {
                extract_documents(&state, *item, Path::new(dir))?;
            }
        }

        LabCommand::Fields { standard } => {
            let standard = standard.clone().unwrap_or_else(|| cfg.default_standard.clone());
            header(format!("Result fields for {standard}"));
            for field in fields_for(Some(standard.as_str())) {
                println!("{:<16} {}", field.key, field.label);
            }
        }
    }

    Ok(())
}

fn item_names(maps: &EntityMaps<'_>, item: Option<&TripItem>) -> (String, String) {
    match item.and_then(|i| maps.company_product_of(i)) {
        Some(cp) => (
            truncate(&maps.company_name(cp), 28),
            truncate(&maps.product_name(cp), 24),
        ),
        None => ("-".into(), "-".into()),
    }
}

fn lab_status_cell(item: &TripItem) -> String {
    paint(
        item.lab_status.map(|s| s.label()).unwrap_or("-"),
        color_for_lab_status(item.lab_status),
    )
}

fn print_or_empty(table: &Table, empty: &str) {
    if table.is_empty() {
        info(empty);
    } else {
        print!("{}", table.render());
    }
}

fn print_form(state: &AppState, trip_item_id: u32) -> AppResult<()> {
    let item = state
        .trip_item(trip_item_id)
        .ok_or(AppError::TripItemNotFound(trip_item_id))?;
    let maps = state.maps();
    let (company, product) = item_names(&maps, Some(item));

    header(format!("Trip item {trip_item_id}: {company} / {product}"));
    println!("{:<14} {}", "Lab status", lab_status_cell(item));
    println!("{:<14} {}", "Entry code", opt_str(item.lab_entry_code.as_deref()));
    println!("{:<14} {}", "Laboratory", maps.lab_name(item.lab_assigned_lab_id));
    println!("{:<14} {}", "Sent", format_date(item.lab_sent_at.as_deref()));

    if let Some(shipment) = &item.lab_shipment_details {
        println!("\n{}", bold("Shipment"));
        for (_, label, value, is_date) in shipment.fields() {
            let shown = if is_date { format_date(Some(value)) } else { opt_str(Some(value)) };
            println!("  {:<20} {}", label, shown);
        }
    }

    let Some(form) = state.lab_form_for(trip_item_id) else {
        println!();
        info("No lab form yet.");
        return Ok(());
    };

    let standard = form.standard_no.clone().or_else(|| standard_of(state, trip_item_id));
    println!("\n{} {}", bold("Results"), italic(&opt_str(standard.as_deref())));
    println!("  {:<34} {}", "Form status", form.status.code());
    for (key, value) in &form.data {
        println!("  {:<34} {}", label_for(standard.as_deref(), key), value);
    }
    if let Some(notes) = &form.lab_notes {
        println!("  {:<34} {}", "Lab notes", wrap_text(notes, 60, 37));
    }
    if let Some(notes) = &form.cpc_notes {
        println!("  {:<34} {}", "Reviewer notes", wrap_text(notes, 60, 37));
    }

    if !form.documents.is_empty() {
        println!("\n{}", bold("Documents"));
        for doc in &form.documents {
            println!("  {} ({}, {} bytes)", doc.name, doc.mime_type, doc.size);
        }
    }

    Ok(())
}

fn extract_documents(state: &AppState, trip_item_id: u32, dir: &Path) -> AppResult<()> {
    let form = state
        .lab_form_for(trip_item_id)
        .ok_or(AppError::LabFormNotFound(trip_item_id))?;

    if form.documents.is_empty() {
        warning("No documents attached.");
        return Ok(());
    }

    fs::create_dir_all(dir)?;
    for doc in &form.documents {
        let target = dir.join(&doc.name);
        fs::write(&target, decode_document(doc)?)?;
        success(format!("Extracted {}", target.display()));
    }
    Ok(())
}
