mod common;
use common::{complete_trip, init_seed, ltr_with, plan_trip, setup_test_data};
use predicates::prelude::*;
use predicates::str::contains;
use std::env;
use std::fs;

/// Seed, plan and complete trip 3 so items 6 and 7 carry samples.
fn completed_trip(name: &str) -> String {
    let data = setup_test_data(name);
    init_seed(&data);
    plan_trip(&data);
    complete_trip(&data);
    data
}

fn send_item_6(data: &str) {
    ltr_with(data)
        .args([
            "lab",
            "send",
            "6",
            "--lab",
            "1",
            "--production-date",
            "2025-09-20",
            "--last-sale-date",
            "2026-03-20",
            "--storage",
            "Cold room",
            "--seal",
            "MH-0042",
        ])
        .assert()
        .success()
        .stdout(contains("Trip item 6 sent to the laboratory as CPC-1040.Ç1.T1.0925."));
}

#[test]
fn test_lab_samples_lists_completed_items() {
    let data = completed_trip("lab_cli_samples");

    ltr_with(&data)
        .args(["lab", "samples"])
        .assert()
        .success()
        .stdout(contains("CPC-1040.Ç1.T1.0925"))
        .stdout(contains("CPC-5310.Ç3.T1.0925"));
}

#[test]
fn test_lab_samples_empty_before_completion() {
    let data = setup_test_data("lab_cli_samples_empty");
    init_seed(&data);
    plan_trip(&data);

    ltr_with(&data)
        .args(["lab", "samples"])
        .assert()
        .success()
        .stdout(contains("No samples waiting for shipment."));
}

#[test]
fn test_lab_send_and_queue() {
    let data = completed_trip("lab_cli_send");
    send_item_6(&data);

    ltr_with(&data)
        .args(["lab", "queue"])
        .assert()
        .success()
        .stdout(contains("İstanbul Merkez Lab."))
        .stdout(contains("15.10.2025"));

    // shipped items leave the samples list
    ltr_with(&data)
        .args(["lab", "samples"])
        .assert()
        .success()
        .stdout(contains("CPC-1040.Ç1.T1.0925").not());
}

#[test]
fn test_lab_send_rejects_missing_shipment_fields() {
    let data = completed_trip("lab_cli_send_missing");

    ltr_with(&data)
        .args([
            "lab",
            "send",
            "6",
            "--lab",
            "1",
            "--production-date",
            "2025-09-20",
            "--last-sale-date",
            "2026-03-20",
            "--storage",
            " ",
            "--seal",
            "MH-0042",
        ])
        .assert()
        .failure()
        .stderr(contains("missing shipment fields"));

    ltr_with(&data)
        .args([
            "lab", "send", "6", "--lab", "99", "--production-date", "2025-09-20",
            "--last-sale-date", "2026-03-20", "--storage", "Cold room", "--seal", "MH-0042",
        ])
        .assert()
        .failure()
        .stderr(contains("unknown laboratory 99"));
}

#[test]
fn test_lab_review_cycle() {
    let data = completed_trip("lab_cli_review");
    send_item_6(&data);

    let report = env::temp_dir().join("lab_cli_review_report.txt");
    fs::write(&report, "day7=31.2\nday28=42.8\n").expect("write report");
    let report = report.to_string_lossy().to_string();

    // remarks missing
    ltr_with(&data)
        .args(["lab", "fill", "6", "--value", "day7=31.2", "--value", "day28=42.8"])
        .assert()
        .failure()
        .stderr(contains("missing lab results: Remarks"));

    ltr_with(&data)
        .args([
            "lab", "fill", "6", "--value", "day7=31.2", "--value", "day28=42.8", "--value",
            "remarks=C30/37 satisfied", "--doc", &report,
        ])
        .assert()
        .success()
        .stdout(contains("(1 document(s) attached)"));

    ltr_with(&data)
        .args(["lab", "inbox"])
        .assert()
        .success()
        .stdout(contains("Waiting confirmation"));

    ltr_with(&data)
        .args(["lab", "revise", "6", "--note", "Recheck the 28-day cube"])
        .assert()
        .success()
        .stdout(contains("sent back for revision"));

    ltr_with(&data)
        .args(["lab", "inbox"])
        .assert()
        .success()
        .stdout(contains("No results waiting for review."));

    ltr_with(&data)
        .args(["lab", "approve", "6"])
        .assert()
        .failure()
        .stderr(contains("no results waiting for confirmation"));

    ltr_with(&data)
        .args([
            "lab", "fill", "6", "--value", "day7=31.2", "--value", "day28=43.1", "--value",
            "remarks=Rechecked",
        ])
        .assert()
        .success();

    ltr_with(&data)
        .args(["lab", "approve", "6"])
        .assert()
        .success()
        .stdout(contains("Results for trip item 6 approved."));

    ltr_with(&data)
        .args(["lab", "show", "6"])
        .assert()
        .success()
        .stdout(contains("Accepted"))
        .stdout(contains("28-day compressive strength (MPa)"))
        .stdout(contains("43.1"))
        .stdout(contains("Recheck the 28-day cube"))
        .stdout(contains("lab_cli_review_report.txt"));

    // approved results are no longer editable
    ltr_with(&data)
        .args([
            "lab", "fill", "6", "--value", "day7=1", "--value", "day28=1", "--value", "remarks=x",
        ])
        .assert()
        .failure()
        .stderr(contains("already under review"));
}

#[test]
fn test_lab_fill_requires_shipment() {
    let data = completed_trip("lab_cli_fill_unsent");

    ltr_with(&data)
        .args(["lab", "fill", "7", "--value", "day7=30"])
        .assert()
        .failure()
        .stderr(contains("has not been sent to a laboratory"));
}

#[test]
fn test_lab_show_extracts_documents() {
    let data = completed_trip("lab_cli_extract");
    send_item_6(&data);

    let report = env::temp_dir().join("lab_cli_extract_cubes.csv");
    fs::write(&report, "cube,mpa\n1,42.8\n").expect("write report");

    ltr_with(&data)
        .args([
            "lab",
            "fill",
            "6",
            "--value",
            "day7=31.2",
            "--value",
            "day28=42.8",
            "--value",
            "remarks=ok",
            "--doc",
            &report.to_string_lossy(),
        ])
        .assert()
        .success();

    let out_dir = env::temp_dir().join("lab_cli_extract_docs");
    fs::remove_dir_all(&out_dir).ok();

    ltr_with(&data)
        .args(["lab", "show", "6", "--extract", &out_dir.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("text/csv"))
        .stdout(contains("Extracted"));

    let extracted =
        fs::read_to_string(out_dir.join("lab_cli_extract_cubes.csv")).expect("extracted document");
    assert_eq!(extracted, "cube,mpa\n1,42.8\n");
}

#[test]
fn test_lab_show_without_form() {
    let data = completed_trip("lab_cli_show_empty");

    ltr_with(&data)
        .args(["lab", "show", "7"])
        .assert()
        .success()
        .stdout(contains("No lab form yet."));

    ltr_with(&data)
        .args(["lab", "show", "42"])
        .assert()
        .failure()
        .stderr(contains("Trip item not found: 42"));
}

#[test]
fn test_lab_fields_per_standard() {
    let data = setup_test_data("lab_cli_fields");
    init_seed(&data);

    ltr_with(&data)
        .args(["lab", "fields", "TS EN 197-1"])
        .assert()
        .success()
        .stdout(contains("initialSetting"))
        .stdout(contains("Soundness / expansion (mm)"));

    ltr_with(&data)
        .args(["lab", "fields"])
        .assert()
        .success()
        .stdout(contains("TS EN 206"))
        .stdout(contains("day28"));
}
