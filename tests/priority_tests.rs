mod common;
use common::{company_product, date, product};
use labtrack::config::{InspectionPolicy, SamplingCycles};
use labtrack::core::priority::{
    PriorityFlag, PriorityReport, classify_inspection_priority, classify_sample_priority,
    next_sample_due_date, required_sample_count, sampling_interval_months,
};
use labtrack::models::{CompanyProductStatus, ProductType};

#[test]
fn test_concrete_sample_priority_by_months_elapsed() {
    let cycles = SamplingCycles::default();
    let concrete = product(ProductType::Concrete);
    let today = date("2025-09-15");

    let cases = [
        ("2025-05-20", PriorityFlag::Overdue),
        ("2025-06-01", PriorityFlag::Approaching),
        ("2025-07-30", PriorityFlag::Ok),
    ];

    for (last, expected) in cases {
        let cp = company_product(CompanyProductStatus::Devam, Some(last), Some("2025-09-01"));
        assert_eq!(
            classify_sample_priority(&cp, &concrete, &cycles, today),
            expected,
            "last sample {last}"
        );
    }
}

#[test]
fn test_suspended_products_are_never_due() {
    let cycles = SamplingCycles::default();
    let cement = product(ProductType::Cement);
    let today = date("2025-09-15");

    for status in [CompanyProductStatus::Aski, CompanyProductStatus::Iptal] {
        let cp = company_product(status, Some("2019-01-01"), None);
        assert_eq!(classify_sample_priority(&cp, &cement, &cycles, today), PriorityFlag::Ok);
        assert_eq!(sampling_interval_months(ProductType::Cement, status, &cycles), None);
        assert_eq!(required_sample_count(ProductType::Cement, status), 0);
    }
}

#[test]
fn test_kesikli_doubles_the_interval() {
    let cycles = SamplingCycles::default();
    for pt in ProductType::ALL {
        let base = sampling_interval_months(pt, CompanyProductStatus::Devam, &cycles);
        let doubled = sampling_interval_months(pt, CompanyProductStatus::Kesikli, &cycles);
        assert_eq!(doubled, base.map(|m| m * 2));
    }

    // cement: 4 months instead of 2
    let cp = company_product(CompanyProductStatus::Kesikli, Some("2025-06-10"), None);
    let today = date("2025-09-15");
    assert_eq!(
        classify_sample_priority(&cp, &product(ProductType::Cement), &cycles, today),
        PriorityFlag::Approaching
    );
}

#[test]
fn test_never_sampled_is_ok_never_inspected_is_overdue() {
    let cycles = SamplingCycles::default();
    let policy = InspectionPolicy::default();
    let today = date("2025-09-15");
    let cp = company_product(CompanyProductStatus::Devam, None, None);

    assert_eq!(
        classify_sample_priority(&cp, &product(ProductType::Concrete), &cycles, today),
        PriorityFlag::Ok
    );
    assert_eq!(classify_inspection_priority(&cp, &policy, today), PriorityFlag::Overdue);
}

#[test]
fn test_unreadable_dates_degrade_to_ok() {
    let cycles = SamplingCycles::default();
    let policy = InspectionPolicy::default();
    let today = date("2025-09-15");
    let cp = company_product(CompanyProductStatus::Devam, Some("not-a-date"), Some("2025-13-45"));

    assert_eq!(
        classify_sample_priority(&cp, &product(ProductType::Concrete), &cycles, today),
        PriorityFlag::Ok
    );
    assert_eq!(classify_inspection_priority(&cp, &policy, today), PriorityFlag::Ok);
    assert_eq!(next_sample_due_date(&cp, &product(ProductType::Concrete), &cycles), None);
}

#[test]
fn test_inspection_cadence_twelve_and_ten_months() {
    let policy = InspectionPolicy::default();
    let today = date("2025-09-15");

    let overdue = company_product(CompanyProductStatus::Devam, None, Some("2024-09-30"));
    let approaching = company_product(CompanyProductStatus::Devam, None, Some("2024-11-02"));
    let ok = company_product(CompanyProductStatus::Devam, None, Some("2025-01-20"));

    assert_eq!(classify_inspection_priority(&overdue, &policy, today), PriorityFlag::Overdue);
    assert_eq!(classify_inspection_priority(&approaching, &policy, today), PriorityFlag::Approaching);
    assert_eq!(classify_inspection_priority(&ok, &policy, today), PriorityFlag::Ok);
}

#[test]
fn test_report_score_and_next_due_dates() {
    let cycles = SamplingCycles::default();
    let policy = InspectionPolicy::default();
    let today = date("2025-09-15");
    let cp = company_product(CompanyProductStatus::Devam, Some("2025-04-10"), Some("2024-11-05"));

    let report = PriorityReport::evaluate(&cp, &product(ProductType::Concrete), &cycles, &policy, today);

    assert_eq!(report.sample, PriorityFlag::Overdue);
    assert_eq!(report.inspection, PriorityFlag::Approaching);
    assert_eq!(report.score, 4);
    assert_eq!(report.worst(), PriorityFlag::Overdue);
    assert_eq!(report.next_sample_due, Some(date("2025-08-10")));
    assert_eq!(report.next_inspection_due, Some(date("2025-11-05")));
}

#[test]
fn test_custom_cycles_change_the_interval() {
    let mut cycles = SamplingCycles::default();
    cycles.set(ProductType::Concrete, 6);
    let cp = company_product(CompanyProductStatus::Devam, Some("2025-04-10"), None);

    assert_eq!(
        classify_sample_priority(&cp, &product(ProductType::Concrete), &cycles, date("2025-09-15")),
        PriorityFlag::Approaching
    );
}

#[test]
fn test_required_sample_count_by_type_and_status() {
    assert_eq!(required_sample_count(ProductType::Concrete, CompanyProductStatus::Devam), 3);
    assert_eq!(required_sample_count(ProductType::Cement, CompanyProductStatus::Devam), 6);
    assert_eq!(required_sample_count(ProductType::Cement, CompanyProductStatus::Kesikli), 3);
    assert_eq!(required_sample_count(ProductType::FlyAsh, CompanyProductStatus::Aski), 0);
}

#[test]
fn test_oversized_cycles_do_not_overflow() {
    let mut cycles = SamplingCycles::default();
    cycles.set(ProductType::Cement, u32::MAX);
    let cp = company_product(CompanyProductStatus::Devam, Some("2025-04-10"), None);
    let intermittent = company_product(CompanyProductStatus::Kesikli, Some("2025-04-10"), None);

    assert_eq!(
        sampling_interval_months(ProductType::Cement, CompanyProductStatus::Kesikli, &cycles),
        None
    );
    assert_eq!(
        classify_sample_priority(&cp, &product(ProductType::Cement), &cycles, date("2025-09-15")),
        PriorityFlag::Ok
    );
    assert_eq!(
        classify_sample_priority(&intermittent, &product(ProductType::Cement), &cycles, date("2025-09-15")),
        PriorityFlag::Ok
    );
}
