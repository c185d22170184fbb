#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use predicates::str::contains;
use labtrack::models::{CompanyProduct, CompanyProductStatus, Product, ProductType};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Pinned clock used by every CLI test.
pub const TODAY: &str = "2025-09-15";

pub fn ltr() -> Command {
    cargo_bin_cmd!("labtrack")
}

/// Command with `--data`, `--test` and `--today` already set.
pub fn ltr_with(data_path: &str) -> Command {
    let mut cmd = ltr();
    cmd.args(["--data", data_path, "--test", "--today", TODAY]);
    cmd
}

/// Create a unique snapshot path inside the system temp dir and remove any existing file
pub fn setup_test_data(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_labtrack.json", name));
    let data_path = path.to_string_lossy().to_string();
    fs::remove_file(&data_path).ok();
    data_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write the seed dataset to `data_path`.
pub fn init_seed(data_path: &str) {
    ltr_with(data_path).arg("init").assert().success();
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn product(product_type: ProductType) -> Product {
    Product {
        id: 1,
        name: "Test product".into(),
        group_name: None,
        product_type,
        standard_no: None,
    }
}

pub fn company_product(
    status: CompanyProductStatus,
    last_sample: Option<&str>,
    last_inspection: Option<&str>,
) -> CompanyProduct {
    CompanyProduct {
        status,
        product_code: Some("CPC-1".into()),
        last_sample_date: last_sample.map(str::to_string),
        last_inspection_date: last_inspection.map(str::to_string),
        ..CompanyProduct::new(1, 1, 1)
    }
}

/// Plan trip 3 over cp 1 (item 6) and cp 6 (item 7, both duties by Mert).
pub fn plan_trip(data: &str) {
    ltr_with(data)
        .args([
            "trip", "create", "--name", "Marmara tour", "--cp", "1,6", "--assignees", "1,2",
            "--duty", "6=BOTH:2", "--planned-at", "2025-09-20", "--transport", "COMPANY_VEHICLE",
            "--plate", "34 ABC 123", "--lodging", "CPC",
        ])
        .assert()
        .success()
        .stdout(contains("Trip 3 planned."));
}

pub fn complete_trip(data: &str) {
    ltr_with(data)
        .args([
            "trip",
            "complete",
            "3",
            "--by",
            "1,2",
            "--km",
            "420",
            "--days",
            "2",
            "--entry",
            "6:performed=2025-09-21,lunch=150",
            "--entry",
            "7:performed=2025-09-22,inspected=2025-09-22,lodging=900",
        ])
        .assert()
        .success()
        .stdout(contains("Trip 3 completed with 2 entry(ies)."));
}
