//! Lab entry (tracking) codes and annual sample counts.

use crate::models::{DutyType, TripCompletion, TripItem};
use crate::utils::date::parse_date;
use chrono::Datelike;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static SEQUENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.T(\d+)\.").expect("valid sequence regex"));

/// Split an existing code into (product code, sequence).
///
/// "CPC-1.T3.0224" → ("CPC-1", 3). The prefix is everything before the last
/// `.T<N>.` segment, not the text before the first `.`: product codes such
/// as "CPC-1040.Ç1" contain dots and must keep their full prefix.
pub fn parse_lab_entry_code(code: &str) -> Option<(&str, u32)> {
    let caps = SEQUENCE_RE.captures_iter(code).last()?;
    let whole = caps.get(0)?;
    let seq = caps.get(1)?.as_str().parse::<u32>().ok()?;
    Some((&code[..whole.start()], seq))
}

/// Next lab entry code for `product_code`: `{code}.T{n}.{MM}{YY}`.
///
/// `n` is one more than the highest sequence already used by another trip
/// item for the same product code. Returns `None` when the product code or
/// the performed date is missing, the date does not parse, or the sequence
/// is exhausted.
pub fn generate_lab_entry_code(
    product_code: Option<&str>,
    performed_at: Option<&str>,
    trip_items: &[TripItem],
    exclude_trip_item_id: Option<u32>,
) -> Option<String> {
    let product_code = product_code.filter(|c| !c.trim().is_empty())?;
    let performed_at = performed_at.filter(|p| !p.trim().is_empty())?;

    let max_sequence = trip_items
        .iter()
        .filter(|item| Some(item.id) != exclude_trip_item_id)
        .filter_map(|item| item.lab_entry_code.as_deref())
        .filter_map(parse_lab_entry_code)
        .filter(|(prefix, _)| *prefix == product_code)
        .map(|(_, seq)| seq)
        .max()
        .unwrap_or(0);

    let date = parse_date(performed_at)?;
    let sequence = max_sequence.checked_add(1)?;

    Some(format!(
        "{}.T{}.{:02}{:02}",
        product_code,
        sequence,
        date.month(),
        date.year().rem_euclid(100)
    ))
}

/// Duty type of a completion entry, falling back to its trip item.
pub fn effective_duty_type(entry_duty: Option<DutyType>, item: Option<&TripItem>) -> Option<DutyType> {
    entry_duty.or_else(|| item.map(|i| i.duty_type))
}

/// Samples taken per company product during `year`.
///
/// One per completion entry whose duty includes sampling and whose performed
/// date falls in `year`. Entries pointing at unknown trip items are skipped.
pub fn build_annual_sample_counts(
    trip_items: &[TripItem],
    completions: &[TripCompletion],
    year: i32,
) -> HashMap<u32, u32> {
    let items: HashMap<u32, &TripItem> = trip_items.iter().map(|i| (i.id, i)).collect();
    let mut counts = HashMap::new();

    for entry in completions.iter().flat_map(|c| c.entries.iter()) {
        let item = items.get(&entry.trip_item_id).copied();

        let samples = effective_duty_type(entry.duty_type, item).is_some_and(|d| d.requires_sample());
        if !samples {
            continue;
        }

        let Some(date) = entry.performed_at.as_deref().and_then(parse_date) else {
            continue;
        };
        if date.year() != year {
            continue;
        }

        if let Some(item) = item {
            *counts.entry(item.company_product_id).or_insert(0) += 1;
        }
    }

    counts
}
