use labtrack::core::samples::{
    build_annual_sample_counts, generate_lab_entry_code, parse_lab_entry_code,
};
use labtrack::models::{DutyType, TripCompletion, TripCompletionEntry, TripItem};

fn item_with_code(id: u32, cp_id: u32, code: Option<&str>) -> TripItem {
    TripItem {
        lab_entry_code: code.map(str::to_string),
        ..TripItem::new(id, 1, cp_id, DutyType::Sample)
    }
}

fn completion(entries: Vec<TripCompletionEntry>) -> TripCompletion {
    TripCompletion {
        trip_id: 1,
        completed_by_employee_ids: vec![1],
        transport_mode: None,
        vehicle_plate: None,
        total_km: None,
        total_days: None,
        lodging_provider: None,
        entries,
        created_at: "2024-06-01T10:00:00+03:00".into(),
    }
}

fn entry(item: u32, duty: Option<DutyType>, performed: Option<&str>) -> TripCompletionEntry {
    TripCompletionEntry {
        duty_type: duty,
        performed_at: performed.map(str::to_string),
        ..TripCompletionEntry::new(item)
    }
}

#[test]
fn test_code_uncomputable_without_product_code_or_date() {
    assert_eq!(generate_lab_entry_code(None, Some("2024-01-01"), &[], None), None);
    assert_eq!(generate_lab_entry_code(Some("CPC-1"), Some("invalid-date"), &[], None), None);
    assert_eq!(generate_lab_entry_code(Some("CPC-1"), None, &[], None), None);
    assert_eq!(generate_lab_entry_code(Some("  "), Some("2024-01-01"), &[], None), None);
}

#[test]
fn test_code_continues_highest_sequence() {
    let items = vec![
        item_with_code(1, 1, Some("CPC-1.T1.0124")),
        item_with_code(2, 1, Some("CPC-1.T3.0224")),
    ];

    assert_eq!(
        generate_lab_entry_code(Some("CPC-1"), Some("2024-03-15"), &items, None).as_deref(),
        Some("CPC-1.T4.0324")
    );
}

#[test]
fn test_code_ignores_other_products_and_excluded_item() {
    let items = vec![
        item_with_code(1, 1, Some("CPC-1.T5.0124")),
        item_with_code(2, 2, Some("CPC-10.T9.0124")),
        item_with_code(3, 1, Some("CPC-1.T2.0124")),
        item_with_code(4, 1, None),
    ];

    // item 1 recomputes its own code: only T2 counts
    assert_eq!(
        generate_lab_entry_code(Some("CPC-1"), Some("2024-11-03"), &items, Some(1)).as_deref(),
        Some("CPC-1.T3.1124")
    );
}

#[test]
fn test_code_first_sequence_and_timestamp_date() {
    assert_eq!(
        generate_lab_entry_code(Some("CPC-2230.Ç4"), Some("2025-09-02T08:30:00+03:00"), &[], None)
            .as_deref(),
        Some("CPC-2230.Ç4.T1.0925")
    );
}

#[test]
fn test_parse_code_keeps_dotted_prefix() {
    assert_eq!(parse_lab_entry_code("CPC-1.T3.0224"), Some(("CPC-1", 3)));
    assert_eq!(parse_lab_entry_code("CPC-1040.Ç1.T12.0725"), Some(("CPC-1040.Ç1", 12)));
    assert_eq!(parse_lab_entry_code("CPC-1040"), None);

    let items = vec![item_with_code(1, 1, Some("CPC-1040.Ç1.T2.0525"))];
    assert_eq!(
        generate_lab_entry_code(Some("CPC-1040.Ç1"), Some("2025-08-20"), &items, None).as_deref(),
        Some("CPC-1040.Ç1.T3.0825")
    );
}

#[test]
fn test_annual_counts_only_sampling_duties_in_year() {
    let items = vec![
        TripItem::new(1, 1, 10, DutyType::Sample),
        TripItem::new(2, 1, 20, DutyType::Inspection),
        TripItem::new(3, 1, 10, DutyType::Both),
    ];

    let completions = vec![completion(vec![
        entry(1, None, Some("2024-03-01")),
        entry(2, None, Some("2024-03-01")),
        entry(3, Some(DutyType::Both), Some("2024-05-10")),
        entry(1, Some(DutyType::Sample), Some("2023-12-31")),
        entry(1, Some(DutyType::Inspection), Some("2024-06-01")),
        entry(99, Some(DutyType::Sample), Some("2024-06-01")),
        entry(3, None, None),
    ])];

    let counts = build_annual_sample_counts(&items, &completions, 2024);
    assert_eq!(counts.get(&10), Some(&2));
    assert_eq!(counts.get(&20), None);
    assert_eq!(counts.len(), 1);
}

#[test]
fn test_exhausted_sequence_yields_no_code() {
    let items = vec![item_with_code(1, 1, Some("CPC-1.T4294967295.0925"))];
    assert_eq!(generate_lab_entry_code(Some("CPC-1"), Some("2025-09-21"), &items, None), None);
}
