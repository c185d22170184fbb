//! Due-date and priority engine for the sampling and inspection cadences.

use crate::config::{InspectionPolicy, SamplingCycles};
use crate::models::{CompanyProduct, CompanyProductStatus, Product, ProductType};
use crate::utils::date::{add_months, months_between, parse_opt};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFlag {
    Ok,
    Approaching,
    Overdue,
}

impl PriorityFlag {
    pub fn code(&self) -> &'static str {
        match self {
            PriorityFlag::Ok => "ok",
            PriorityFlag::Approaching => "approaching",
            PriorityFlag::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityFlag::Ok => "OK",
            PriorityFlag::Approaching => "Approaching",
            PriorityFlag::Overdue => "Overdue",
        }
    }

    /// Weight used to rank company products: overdue 3, approaching 1.
    pub fn weight(&self) -> u32 {
        match self {
            PriorityFlag::Ok => 0,
            PriorityFlag::Approaching => 1,
            PriorityFlag::Overdue => 3,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "ok" => Some(PriorityFlag::Ok),
            "approaching" => Some(PriorityFlag::Approaching),
            "overdue" => Some(PriorityFlag::Overdue),
            _ => None,
        }
    }
}

/// Effective sampling interval in months.
///
/// `None` for suspended products (`aski`, `iptal`); doubled for `kesikli`.
/// An interval too large to represent is treated as no interval.
pub fn sampling_interval_months(
    product_type: ProductType,
    status: CompanyProductStatus,
    cycles: &SamplingCycles,
) -> Option<u32> {
    if status.is_suspended() {
        return None;
    }

    let base = cycles.months(product_type);
    if status == CompanyProductStatus::Kesikli {
        base.checked_mul(2)
    } else {
        Some(base)
    }
}

/// Classify against an interval by whole calendar months elapsed.
fn classify(elapsed: i32, overdue_at: u32, approaching_at: u32) -> PriorityFlag {
    let elapsed = i64::from(elapsed);
    if elapsed >= i64::from(overdue_at) {
        PriorityFlag::Overdue
    } else if elapsed >= i64::from(approaching_at) {
        PriorityFlag::Approaching
    } else {
        PriorityFlag::Ok
    }
}

/// Sampling urgency.
///
/// Never sampled, suspended, or an unreadable last sample date are all `Ok`.
pub fn classify_sample_priority(
    cp: &CompanyProduct,
    product: &Product,
    cycles: &SamplingCycles,
    today: NaiveDate,
) -> PriorityFlag {
    let Some(last) = parse_opt(cp.last_sample_date.as_deref()) else {
        return PriorityFlag::Ok;
    };

    let Some(interval) = sampling_interval_months(product.product_type, cp.status, cycles) else {
        return PriorityFlag::Ok;
    };

    let elapsed = months_between(last, today);
    classify(elapsed, interval, interval.saturating_sub(1))
}

/// Inspection urgency. A product never inspected is `Overdue`.
pub fn classify_inspection_priority(
    cp: &CompanyProduct,
    policy: &InspectionPolicy,
    today: NaiveDate,
) -> PriorityFlag {
    let Some(raw) = cp.last_inspection_date.as_deref() else {
        return PriorityFlag::Overdue;
    };

    let Some(last) = parse_opt(Some(raw)) else {
        return PriorityFlag::Ok;
    };

    let elapsed = months_between(last, today);
    classify(elapsed, policy.cycle_months, policy.warning_months)
}

pub fn next_sample_due_date(
    cp: &CompanyProduct,
    product: &Product,
    cycles: &SamplingCycles,
) -> Option<NaiveDate> {
    let last = parse_opt(cp.last_sample_date.as_deref())?;
    let interval = sampling_interval_months(product.product_type, cp.status, cycles)?;
    add_months(last, interval)
}

pub fn next_inspection_due_date(cp: &CompanyProduct, policy: &InspectionPolicy) -> Option<NaiveDate> {
    let last = parse_opt(cp.last_inspection_date.as_deref())?;
    add_months(last, policy.cycle_months)
}

/// Yearly sample quota shown next to the annual count.
pub fn required_sample_count(product_type: ProductType, status: CompanyProductStatus) -> u32 {
    if status.is_suspended() {
        return 0;
    }
    if status == CompanyProductStatus::Kesikli || product_type == ProductType::Concrete {
        3
    } else {
        6
    }
}

pub fn priority_score(sample: PriorityFlag, inspection: PriorityFlag) -> u32 {
    sample.weight() + inspection.weight()
}

/// Both cadences evaluated for one company product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityReport {
    pub sample: PriorityFlag,
    pub inspection: PriorityFlag,
    pub score: u32,
    pub next_sample_due: Option<NaiveDate>,
    pub next_inspection_due: Option<NaiveDate>,
}

impl PriorityReport {
    pub fn evaluate(
        cp: &CompanyProduct,
        product: &Product,
        cycles: &SamplingCycles,
        policy: &InspectionPolicy,
        today: NaiveDate,
    ) -> Self {
        let sample = classify_sample_priority(cp, product, cycles, today);
        let inspection = classify_inspection_priority(cp, policy, today);
        Self {
            sample,
            inspection,
            score: priority_score(sample, inspection),
            next_sample_due: next_sample_due_date(cp, product, cycles),
            next_inspection_due: next_inspection_due_date(cp, policy),
        }
    }

    /// The worse of the two flags, used for row colouring.
    pub fn worst(&self) -> PriorityFlag {
        self.sample.max(self.inspection)
    }
}
