mod common;
use common::{init_seed, ltr, ltr_with, setup_test_data};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

#[test]
fn test_init_writes_seed_snapshot() {
    let data = setup_test_data("cli_init");

    ltr_with(&data)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Seed dataset written: 8 company products, 6 employees, 5 trip items"));

    let content = fs::read_to_string(&data).expect("snapshot written");
    let json: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(json["companyProducts"].as_array().map(|a| a.len()), Some(8));
    assert_eq!(json["labs"].as_array().map(|a| a.len()), Some(6));
    assert_eq!(json["log"][0]["operation"], "init");
}

#[test]
fn test_commands_fail_without_snapshot() {
    let data = setup_test_data("cli_missing");

    ltr_with(&data)
        .arg("due")
        .assert()
        .failure()
        .stderr(contains("Snapshot not found"));
}

#[test]
fn test_invalid_today_is_rejected() {
    let data = setup_test_data("cli_bad_today");
    init_seed(&data);

    ltr()
        .args(["--data", &data, "--test", "--today", "2025-02-30", "due"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_due_list_ranks_and_filters() {
    let data = setup_test_data("cli_due");
    init_seed(&data);

    ltr_with(&data)
        .arg("due")
        .assert()
        .success()
        .stdout(contains("Due list at 15.09.2025"))
        .stdout(contains("Toros Madencilik"))
        .stdout(contains("8 company product(s)"));

    ltr_with(&data)
        .args(["due", "--product-type", "cement"])
        .assert()
        .success()
        .stdout(contains("Marmara Çimento"))
        .stdout(contains("2 company product(s)"));

    ltr_with(&data)
        .args(["due", "--city", "Bursa", "--priority", "overdue"])
        .assert()
        .success()
        .stdout(contains("CEM II/A-M"));

    ltr_with(&data)
        .args(["due", "--customer", "bt-448"])
        .assert()
        .success()
        .stdout(contains("Ege Yapı Kimya"))
        .stdout(contains("2 company product(s)"));
}

#[test]
fn test_due_with_no_match_lists_filter_values() {
    let data = setup_test_data("cli_due_empty");
    init_seed(&data);

    ltr_with(&data)
        .args(["due", "--city", "Ankara"])
        .assert()
        .success()
        .stdout(contains("No company products match"))
        .stdout(contains("Trabzon"));
}

#[test]
fn test_due_rejects_unknown_product_type() {
    let data = setup_test_data("cli_due_bad_type");
    init_seed(&data);

    ltr_with(&data)
        .args(["due", "--product-type", "asphalt"])
        .assert()
        .failure()
        .stderr(contains("Invalid value for product type: asphalt"));
}

#[test]
fn test_dashboard_summary() {
    let data = setup_test_data("cli_dashboard");
    init_seed(&data);

    ltr_with(&data)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(contains("Dashboard at 15.09.2025"))
        .stdout(contains("Active trips"))
        .stdout(contains("Top prioritized"));
}

#[test]
fn test_employees_and_company_products() {
    let data = setup_test_data("cli_lists");
    init_seed(&data);

    ltr_with(&data)
        .arg("employees")
        .assert()
        .success()
        .stdout(contains("Ayşe Yıldız"))
        .stdout(contains("Available"));

    ltr_with(&data)
        .args(["cp", "status", "7", "iptal"])
        .assert()
        .success();

    ltr_with(&data)
        .args(["cp", "list"])
        .assert()
        .success()
        .stdout(contains("CPC-1040.Ç1"))
        .stdout(contains("CPC-1540.U2").not());

    ltr_with(&data)
        .args(["cp", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("CPC-1540.U2"));
}

#[test]
fn test_cp_add_and_update() {
    let data = setup_test_data("cli_cp_add");
    init_seed(&data);

    ltr_with(&data)
        .args([
            "cp", "add", "--company", "4", "--product", "6", "--code", "CPC-5310.U1",
            "--last-sample", "2025-08-01", "--status", "kesikli",
        ])
        .assert()
        .success()
        .stdout(contains("Company product 9 added."));

    ltr_with(&data)
        .args(["cp", "update", "9", "--payment", "paid", "--last-inspection", "2025-08-01"])
        .assert()
        .success();

    ltr_with(&data)
        .args(["cp", "list", "--status", "kesikli"])
        .assert()
        .success()
        .stdout(contains("CPC-5310.U1"))
        .stdout(contains("Paid"));

    ltr_with(&data)
        .args(["cp", "add", "--company", "42", "--product", "1"])
        .assert()
        .failure()
        .stderr(contains("unknown company 42"));

    ltr_with(&data)
        .args(["cp", "update", "99", "--code", "X"])
        .assert()
        .failure()
        .stderr(contains("Company product not found: 99"));
}

#[test]
fn test_cycles_print_and_set() {
    let data = setup_test_data("cli_cycles");

    ltr_with(&data)
        .arg("cycles")
        .assert()
        .success()
        .stdout(contains("Sampling cycles"))
        .stdout(contains("Fly ash"));

    ltr_with(&data)
        .args(["cycles", "--set", "concrete=6"])
        .assert()
        .success()
        .stdout(contains("Concrete cycle set to 6 month(s)"));

    ltr_with(&data)
        .args(["cycles", "--set", "concrete=0"])
        .assert()
        .failure()
        .stderr(contains("Invalid value for months"));
}

#[test]
fn test_log_lists_mutations() {
    let data = setup_test_data("cli_log");
    init_seed(&data);

    ltr_with(&data)
        .args(["cp", "status", "3", "aski"])
        .assert()
        .success();

    ltr_with(&data)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("devam -> aski"));

    ltr_with(&data)
        .args(["log", "--print", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("cp_status"))
        .stdout(contains("Seed dataset").not());
}

#[test]
fn test_config_print() {
    let data = setup_test_data("cli_config");

    ltr_with(&data)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("sampling_cycles"))
        .stdout(contains(data.as_str()));
}
