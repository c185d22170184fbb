//! Laboratory intake: shipment, result entry, review and revision.

use crate::core::lab_fields::{fields_for, missing_fields};
use crate::core::samples::{effective_duty_type, generate_lab_entry_code};
use crate::errors::{AppError, AppResult};
use crate::models::{
    LabForm, LabFormDocument, LabFormStatus, LabShipmentDetails, LabStatus, TripItem, TripStatus,
};
use crate::store::AppState;
use crate::store::log::ttlog;
use crate::utils::date::{now_iso, parse_opt};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Optional fields written together with a lab status change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabStatusOptions {
    pub sent_at: Option<String>,
    pub shipment: Option<LabShipmentDetails>,
    pub lab_id: Option<u32>,
    pub lab_entry_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendToLabRequest {
    pub trip_item_id: u32,
    pub lab_id: u32,
    pub shipment: LabShipmentDetails,
}

/// Full replacement of a lab form. Notes and documents left `None` are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabFormInput {
    pub trip_item_id: u32,
    pub standard_no: Option<String>,
    pub data: BTreeMap<String, String>,
    pub status: LabFormStatus,
    pub lab_notes: Option<String>,
    pub cpc_notes: Option<String>,
    pub documents: Option<Vec<LabFormDocument>>,
}

/// Values entered by the laboratory for one sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabResultsInput {
    pub trip_item_id: u32,
    pub data: BTreeMap<String, String>,
    pub lab_notes: Option<String>,
    pub documents: Vec<LabFormDocument>,
    /// Standard used when the product has none.
    pub default_standard: Option<String>,
}

fn item_mut(state: &mut AppState, trip_item_id: u32) -> AppResult<&mut TripItem> {
    state
        .trip_items
        .iter_mut()
        .find(|i| i.id == trip_item_id)
        .ok_or(AppError::TripItemNotFound(trip_item_id))
}

/// Standard of the product behind a trip item, if known.
pub fn standard_of(state: &AppState, trip_item_id: u32) -> Option<String> {
    let item = state.trip_item(trip_item_id)?;
    let cp = state.company_product(item.company_product_id)?;
    state
        .products
        .iter()
        .find(|p| p.id == cp.product_id)
        .and_then(|p| p.standard_no.clone())
}

pub fn update_trip_item_lab_status(
    state: &mut AppState,
    trip_item_id: u32,
    status: LabStatus,
    options: LabStatusOptions,
) -> AppResult<()> {
    let item = item_mut(state, trip_item_id)?;
    item.lab_status = Some(status);

    if let Some(sent_at) = options.sent_at {
        item.lab_sent_at = Some(sent_at);
    }
    if let Some(shipment) = options.shipment {
        item.lab_shipment_details = Some(shipment);
    }
    if let Some(lab_id) = options.lab_id {
        item.lab_assigned_lab_id = Some(lab_id);
    }
    if let Some(code) = options.lab_entry_code.filter(|c| !c.is_empty()) {
        item.lab_entry_code = Some(code);
    }

    ttlog(
        state,
        "lab_status",
        &format!("item {trip_item_id}"),
        &format!("Lab status set to {}", status.code()),
    );
    Ok(())
}

/// Labels of the mandatory shipment fields left blank.
pub fn missing_shipment_fields(shipment: &LabShipmentDetails) -> Vec<&'static str> {
    shipment
        .fields()
        .into_iter()
        .filter(|(key, ..)| matches!(*key, "productionDate" | "lastSaleDate" | "storage" | "sealNo"))
        .filter(|(_, _, value, _)| value.trim().is_empty())
        .map(|(_, label, ..)| label)
        .collect()
}

/// Performed date and tracking code recorded for a trip item on completion.
fn completion_record(state: &AppState, trip_item_id: u32) -> (Option<String>, Option<String>) {
    state
        .trip_completions
        .iter()
        .flat_map(|c| c.entries.iter())
        .find(|e| e.trip_item_id == trip_item_id)
        .map(|e| (e.performed_at.clone(), e.tracking_code.clone()))
        .unwrap_or((None, None))
}

/// Entry code a shipment of this item would carry.
pub fn pending_entry_code(state: &AppState, trip_item_id: u32) -> Option<String> {
    let item = state.trip_item(trip_item_id)?;
    if let Some(code) = item.lab_entry_code.clone().filter(|c| !c.is_empty()) {
        return Some(code);
    }

    let (performed_at, tracking_code) = completion_record(state, trip_item_id);
    if tracking_code.is_some() {
        return tracking_code;
    }

    let product_code = state
        .company_product(item.company_product_id)
        .and_then(|cp| cp.product_code.as_deref());
    let performed_at = performed_at.or_else(|| item.sampled_at.clone());

    generate_lab_entry_code(
        product_code,
        performed_at.as_deref(),
        &state.trip_items,
        Some(trip_item_id),
    )
}

/// Ship a sample to a laboratory. Returns the lab entry code used.
pub fn send_to_lab(state: &mut AppState, request: SendToLabRequest, now: &str) -> AppResult<String> {
    let trip_item_id = request.trip_item_id;
    if state.trip_item(trip_item_id).is_none() {
        return Err(AppError::TripItemNotFound(trip_item_id));
    }

    if !state.labs.iter().any(|l| l.id == request.lab_id) {
        return Err(AppError::Validation(format!("unknown laboratory {}", request.lab_id)));
    }

    let missing = missing_shipment_fields(&request.shipment);
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "missing shipment fields: {}",
            missing.join(", ")
        )));
    }

    let code = pending_entry_code(state, trip_item_id).ok_or(AppError::TrackingCode(trip_item_id))?;

    update_trip_item_lab_status(
        state,
        trip_item_id,
        LabStatus::Submitted,
        LabStatusOptions {
            sent_at: Some(now.to_string()),
            shipment: Some(request.shipment),
            lab_id: Some(request.lab_id),
            lab_entry_code: Some(code.clone()),
        },
    )?;

    ttlog(
        state,
        "lab_send",
        &format!("item {trip_item_id}"),
        &format!("Sent to lab {} as {}", request.lab_id, code),
    );
    Ok(code)
}

/// Create or replace the form of a trip item and mirror its status.
pub fn upsert_lab_form(state: &mut AppState, input: LabFormInput) -> AppResult<()> {
    let trip_item_id = input.trip_item_id;
    if state.trip_item(trip_item_id).is_none() {
        return Err(AppError::TripItemNotFound(trip_item_id));
    }

    let timestamp = now_iso();
    let next_id = state.next_lab_form_id();

    let idx = match state.lab_forms.iter().position(|f| f.trip_item_id == trip_item_id) {
        Some(idx) => idx,
        None => {
            state.lab_forms.push(LabForm {
                id: next_id,
                trip_item_id,
                standard_no: None,
                data: BTreeMap::new(),
                status: LabFormStatus::Draft,
                updated_at: None,
                lab_notes: None,
                cpc_notes: None,
                documents: Vec::new(),
            });
            state.lab_forms.len() - 1
        }
    };

    let form = &mut state.lab_forms[idx];
    form.standard_no = input.standard_no;
    form.data = input.data;
    form.status = input.status;
    form.updated_at = Some(timestamp);
    if let Some(notes) = input.lab_notes {
        form.lab_notes = Some(notes);
    }
    if let Some(notes) = input.cpc_notes {
        form.cpc_notes = Some(notes);
    }
    if let Some(documents) = input.documents {
        form.documents = documents;
    }

    let lab_status = input.status.to_lab_status();
    item_mut(state, trip_item_id)?.lab_status = Some(lab_status);

    ttlog(
        state,
        "lab_form",
        &format!("item {trip_item_id}"),
        &format!("Form {} (item {})", input.status.code(), lab_status.code()),
    );
    Ok(())
}

/// Laboratory result entry. Every field of the product standard is required;
/// the form goes to `WAITING_CONFIRM`.
pub fn submit_lab_results(state: &mut AppState, input: LabResultsInput) -> AppResult<()> {
    let trip_item_id = input.trip_item_id;
    let item = state
        .trip_item(trip_item_id)
        .ok_or(AppError::TripItemNotFound(trip_item_id))?;

    if item.lab_sent_at.is_none() {
        return Err(AppError::Validation(format!(
            "trip item {trip_item_id} has not been sent to a laboratory"
        )));
    }
    if matches!(item.lab_status, Some(LabStatus::Accepted | LabStatus::WaitingConfirm)) {
        return Err(AppError::Validation(format!(
            "trip item {trip_item_id} is already under review"
        )));
    }

    let standard_no = standard_of(state, trip_item_id).or(input.default_standard);
    let fields = fields_for(standard_no.as_deref());
    let missing = missing_fields(fields, &input.data);
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|f| f.label).collect();
        return Err(AppError::Validation(format!(
            "missing lab results: {}",
            labels.join(", ")
        )));
    }

    let existing = state.lab_form_for(trip_item_id);
    let mut documents = existing.map(|f| f.documents.clone()).unwrap_or_default();
    documents.extend(input.documents);

    upsert_lab_form(
        state,
        LabFormInput {
            trip_item_id,
            standard_no,
            data: input.data,
            status: LabFormStatus::WaitingConfirm,
            lab_notes: input.lab_notes,
            cpc_notes: None,
            documents: Some(documents),
        },
    )
}

/// Re-submit an existing form with a new status, keeping its content.
fn restate_form(
    state: &mut AppState,
    trip_item_id: u32,
    status: LabFormStatus,
    cpc_notes: Option<String>,
) -> AppResult<()> {
    let form = state
        .lab_form_for(trip_item_id)
        .cloned()
        .ok_or(AppError::LabFormNotFound(trip_item_id))?;

    upsert_lab_form(
        state,
        LabFormInput {
            trip_item_id,
            standard_no: form.standard_no,
            data: form.data,
            status,
            lab_notes: form.lab_notes,
            cpc_notes: cpc_notes.or(form.cpc_notes),
            documents: Some(form.documents),
        },
    )
}

/// Approval and revision only apply to results waiting for confirmation.
fn ensure_waiting_confirm(state: &AppState, trip_item_id: u32) -> AppResult<()> {
    let item = state
        .trip_item(trip_item_id)
        .ok_or(AppError::TripItemNotFound(trip_item_id))?;
    if state.lab_form_for(trip_item_id).is_none() {
        return Err(AppError::LabFormNotFound(trip_item_id));
    }
    if item.lab_status != Some(LabStatus::WaitingConfirm) {
        return Err(AppError::Validation(format!(
            "trip item {trip_item_id} has no results waiting for confirmation"
        )));
    }
    Ok(())
}

pub fn approve_lab_form(state: &mut AppState, trip_item_id: u32) -> AppResult<()> {
    ensure_waiting_confirm(state, trip_item_id)?;
    restate_form(state, trip_item_id, LabFormStatus::Approved, None)?;
    update_trip_item_lab_status(
        state,
        trip_item_id,
        LabStatus::Accepted,
        LabStatusOptions::default(),
    )
}

/// Send results back to the laboratory with a reviewer note.
pub fn request_revision(state: &mut AppState, trip_item_id: u32, note: &str) -> AppResult<()> {
    let note = note.trim();
    if note.is_empty() {
        return Err(AppError::Validation("revision note must not be empty".into()));
    }
    ensure_waiting_confirm(state, trip_item_id)?;

    restate_form(state, trip_item_id, LabFormStatus::Draft, Some(note.to_string()))?;
    update_trip_item_lab_status(
        state,
        trip_item_id,
        LabStatus::Pending,
        LabStatusOptions::default(),
    )
}

// ------------------------------------------------
// Queues
// ------------------------------------------------

/// A sample collected on a completed trip and not yet shipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadySample {
    pub trip_id: u32,
    pub trip_item_id: u32,
    pub performed_at: String,
    pub tracking_code: Option<String>,
}

pub fn samples_ready_to_ship(state: &AppState) -> Vec<ReadySample> {
    let mut rows = Vec::new();

    for completion in &state.trip_completions {
        let completed = state
            .trip(completion.trip_id)
            .is_some_and(|t| t.status == TripStatus::Completed);
        if !completed {
            continue;
        }

        for entry in &completion.entries {
            let Some(item) = state.trip_item(entry.trip_item_id) else {
                continue;
            };
            let samples = effective_duty_type(entry.duty_type, Some(item))
                .is_some_and(|d| d.requires_sample());
            let Some(performed_at) = entry.performed_at.clone().filter(|_| samples) else {
                continue;
            };
            if !matches!(item.lab_status, None | Some(LabStatus::Pending)) {
                continue;
            }

            rows.push(ReadySample {
                trip_id: completion.trip_id,
                trip_item_id: item.id,
                performed_at,
                tracking_code: entry
                    .tracking_code
                    .clone()
                    .or_else(|| pending_entry_code(state, item.id)),
            });
        }
    }

    rows
}

/// A shipped sample the laboratory still has to report on.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingEntry<'a> {
    pub item: &'a TripItem,
    pub sent_at: Option<String>,
    pub expected_return: Option<NaiveDate>,
}

/// Newest shipment first.
pub fn lab_processing_queue(state: &AppState, turnaround_days: u32) -> Vec<ProcessingEntry<'_>> {
    let mut queue: Vec<ProcessingEntry<'_>> = state
        .trip_items
        .iter()
        .filter(|i| i.lab_sent_at.is_some())
        .filter(|i| !matches!(i.lab_status, Some(LabStatus::Accepted | LabStatus::WaitingConfirm)))
        .map(|item| {
            let sent_at = item.lab_sent_at.clone().or_else(|| item.sampled_at.clone());
            let expected_return = parse_opt(sent_at.as_deref())
                .and_then(|d| d.checked_add_days(Days::new(turnaround_days as u64)));
            ProcessingEntry {
                item,
                sent_at,
                expected_return,
            }
        })
        .collect();

    queue.sort_by(|a, b| {
        let sent = |e: &ProcessingEntry<'_>| parse_opt(e.sent_at.as_deref());
        sent(b).cmp(&sent(a)).then_with(|| b.sent_at.cmp(&a.sent_at))
    });
    queue
}

/// Results waiting for review, and accepted ones kept for reference.
pub fn admin_inbox(state: &AppState) -> Vec<&TripItem> {
    state
        .trip_items
        .iter()
        .filter(|i| matches!(i.lab_status, Some(LabStatus::WaitingConfirm | LabStatus::Accepted)))
        .collect()
}

// ------------------------------------------------
// Documents
// ------------------------------------------------

fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Read a file into a document held inline as a base64 `data:` URI.
///
/// Files larger than `max_size` bytes are rejected before being read.
pub fn read_document(path: &Path, max_size: u64) -> AppResult<LabFormDocument> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    let size = fs::metadata(path)?.len();
    if size > max_size {
        return Err(AppError::DocumentTooLarge {
            name,
            size,
            limit: max_size,
        });
    }

    let bytes = fs::read(path)?;
    let mime_type = mime_type_for(path).to_string();
    let data_url = format!("data:{};base64,{}", mime_type, B64.encode(&bytes));

    Ok(LabFormDocument {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        size: bytes.len() as u64,
        mime_type,
        uploaded_at: now_iso(),
        data_url,
    })
}

/// Decode a document back to its bytes.
pub fn decode_document(doc: &LabFormDocument) -> AppResult<Vec<u8>> {
    let payload = doc
        .data_url
        .split_once(";base64,")
        .map(|(_, p)| p)
        .ok_or_else(|| AppError::Validation(format!("document '{}' is not a base64 data URI", doc.name)))?;
    B64.decode(payload)
        .map_err(|e| AppError::Validation(format!("document '{}': {e}", doc.name)))
}
