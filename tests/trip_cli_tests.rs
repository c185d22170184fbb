mod common;
use common::{complete_trip, init_seed, ltr_with, plan_trip, setup_test_data, temp_out};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

#[test]
fn test_trip_create_list_and_show() {
    let data = setup_test_data("trip_cli_create");
    init_seed(&data);
    plan_trip(&data);

    ltr_with(&data)
        .args(["trip", "list", "--status", "active"])
        .assert()
        .success()
        .stdout(contains("Marmara tour"));

    ltr_with(&data)
        .args(["trip", "show", "3"])
        .assert()
        .success()
        .stdout(contains("Inspection + Sample"))
        .stdout(contains("Mert Demir"))
        .stdout(contains("34 ABC 123"));

    ltr_with(&data)
        .arg("employees")
        .assert()
        .success()
        .stdout(contains("In the field"));
}

#[test]
fn test_trip_create_validation_failures() {
    let data = setup_test_data("trip_cli_invalid");
    init_seed(&data);

    // Mert has no fly ash skill
    ltr_with(&data)
        .args(["trip", "create", "--cp", "7", "--assignees", "2"])
        .assert()
        .failure()
        .stderr(contains("no assignee is skilled for: Fly ash"));

    ltr_with(&data)
        .args(["trip", "create", "--cp", "1", "--assignees", "1", "--duty", "1=BOTH:3"])
        .assert()
        .failure()
        .stderr(contains("duty assignee 3"));

    ltr_with(&data)
        .args(["trip", "create", "--cp", "1", "--assignees", "1", "--duty", "oops"])
        .assert()
        .failure()
        .stderr(contains("Invalid value for duty"));

    // nothing was written
    ltr_with(&data)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(contains("No trips found."));
}

#[test]
fn test_trip_complete_inline_entries() {
    let data = setup_test_data("trip_cli_complete");
    init_seed(&data);
    plan_trip(&data);
    complete_trip(&data);

    ltr_with(&data)
        .args(["trip", "show", "3"])
        .assert()
        .success()
        .stdout(contains("Completed"))
        .stdout(contains("CPC-1040.Ç1.T1.0925"))
        .stdout(contains("CPC-5310.Ç3.T1.0925"))
        .stdout(contains("1050.00"));

    ltr_with(&data)
        .arg("employees")
        .assert()
        .success()
        .stdout(contains("In the field").not());
}

#[test]
fn test_trip_complete_requires_every_item() {
    let data = setup_test_data("trip_cli_complete_missing");
    init_seed(&data);
    plan_trip(&data);

    ltr_with(&data)
        .args([
            "trip", "complete", "3", "--by", "1", "--km", "420", "--days", "2", "--entry",
            "6:performed=2025-09-21",
        ])
        .assert()
        .failure()
        .stderr(contains("item 7: sample date is required"))
        .stderr(contains("item 7: inspection date is required"));

    ltr_with(&data)
        .args([
            "trip", "complete", "3", "--by", "1", "--km", "420", "--days", "2", "--entry",
            "6:performed=2025-09-21", "--entry", "7:no-sample,no-inspection",
        ])
        .assert()
        .success();
}

#[test]
fn test_trip_complete_from_yaml_file() {
    let data = setup_test_data("trip_cli_yaml");
    init_seed(&data);

    ltr_with(&data)
        .args(["trip", "create", "--cp", "3", "--assignees", "5"])
        .assert()
        .success();

    let file = temp_out("trip_cli_yaml", "yaml");
    fs::write(
        &file,
        "completedByEmployeeIds: [5]\n\
         transportMode: BUS\n\
         totalKm: 300\n\
         totalDays: 1\n\
         lodgingProvider: COMPANY\n\
         entries:\n  \
           - tripItemId: 6\n    \
             performedAt: \"2025-09-18\"\n    \
             mealLunchExpense: 200\n",
    )
    .expect("write completion file");

    ltr_with(&data)
        .args(["trip", "complete", "3", "--file", &file])
        .assert()
        .success();

    ltr_with(&data)
        .args(["trip", "show", "3"])
        .assert()
        .success()
        .stdout(contains("CPC-2230.Ç4.T1.0925"))
        .stdout(contains("200.00"));
}

#[test]
fn test_trip_status_update_and_sample() {
    let data = setup_test_data("trip_cli_status");
    init_seed(&data);
    plan_trip(&data);

    ltr_with(&data)
        .args(["trip", "update", "3", "--notes", "Gate code 1234"])
        .assert()
        .success();

    ltr_with(&data)
        .args(["trip", "sample", "--item", "6"])
        .assert()
        .success()
        .stdout(contains("1 sample(s) recorded on 2025-09-15."));

    ltr_with(&data)
        .args(["trip", "status", "3", "cancelled"])
        .assert()
        .success()
        .stdout(contains("Trip 3 is now Cancelled."));

    ltr_with(&data)
        .args(["trip", "show", "3"])
        .assert()
        .success()
        .stdout(contains("Gate code 1234"))
        .stdout(contains("15.09.2025"));

    ltr_with(&data)
        .args(["trip", "status", "9", "active"])
        .assert()
        .failure()
        .stderr(contains("Trip not found: 9"));
}
