//! The "due this month" list: every company product with its priorities,
//! annual sample count and quota, ranked by priority score.

use crate::config::{InspectionPolicy, SamplingCycles};
use crate::core::priority::{PriorityFlag, PriorityReport, required_sample_count};
use crate::core::samples::build_annual_sample_counts;
use crate::models::{Company, CompanyProduct, Product, ProductType, Site};
use crate::store::AppState;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DueFilters {
    pub product_types: Vec<ProductType>,
    pub city: Option<String>,
    pub standard_no: Option<String>,
    /// Case-insensitive substring of the customer code.
    pub customer_code: Option<String>,
    /// Matches the sampling priority only.
    pub priority: Option<PriorityFlag>,
}

impl DueFilters {
    fn accepts(&self, row: &DueRow<'_>) -> bool {
        if !self.product_types.is_empty() && !self.product_types.contains(&row.product.product_type) {
            return false;
        }

        if let Some(city) = &self.city
            && row.site.map(|s| s.city.as_str()) != Some(city.as_str())
        {
            return false;
        }

        if let Some(standard) = &self.standard_no
            && row.product.standard_no.as_deref() != Some(standard.as_str())
        {
            return false;
        }

        if let Some(code) = &self.customer_code {
            let needle = code.to_lowercase();
            let matched = row
                .company
                .customer_code
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle));
            if !matched {
                return false;
            }
        }

        if let Some(priority) = self.priority
            && row.report.sample != priority
        {
            return false;
        }

        true
    }
}

#[derive(Debug, Clone)]
pub struct DueRow<'a> {
    pub cp: &'a CompanyProduct,
    pub product: &'a Product,
    pub company: &'a Company,
    pub site: Option<&'a Site>,
    pub report: PriorityReport,
    pub sample_count: u32,
    pub sample_quota: u32,
}

/// Company products whose product or company is unknown are left out.
pub fn build_due_list<'a>(
    state: &'a AppState,
    cycles: &SamplingCycles,
    policy: &InspectionPolicy,
    today: NaiveDate,
    filters: &DueFilters,
) -> Vec<DueRow<'a>> {
    let maps = state.maps();
    let counts = build_annual_sample_counts(&state.trip_items, &state.trip_completions, today.year());

    let mut rows: Vec<DueRow<'a>> = state
        .company_products
        .iter()
        .filter_map(|cp| {
            let product = maps.product_of(cp)?;
            let company = maps.company_of(cp)?;
            Some(DueRow {
                cp,
                product,
                company,
                site: maps.site_of(cp),
                report: PriorityReport::evaluate(cp, product, cycles, policy, today),
                sample_count: counts.get(&cp.id).copied().unwrap_or(0),
                sample_quota: required_sample_count(product.product_type, cp.status),
            })
        })
        .filter(|row| filters.accepts(row))
        .collect();

    // Stable: equal scores keep their collection order.
    rows.sort_by(|a, b| b.report.score.cmp(&a.report.score));
    rows
}

/// Distinct cities and standards, for filter hints.
pub fn filter_values(state: &AppState) -> (Vec<String>, Vec<String>) {
    let maps = state.maps();
    let mut cities: Vec<String> = state
        .company_products
        .iter()
        .filter_map(|cp| maps.site_of(cp))
        .map(|s| s.city.clone())
        .collect();
    cities.sort();
    cities.dedup();

    let mut standards: Vec<String> = state
        .company_products
        .iter()
        .filter_map(|cp| maps.product_of(cp))
        .filter_map(|p| p.standard_no.clone())
        .collect();
    standards.sort();
    standards.dedup();

    (cities, standards)
}
