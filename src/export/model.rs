// src/export/model.rs

use crate::core::due::DueRow;
use crate::models::{TripCompletion, TripCompletionEntry};
use crate::store::EntityMaps;
use serde::Serialize;

/// A flat record that can be written by every exporter.
pub trait ExportRecord: Serialize {
    /// Column headers for CSV / XLSX.
    fn headers() -> Vec<&'static str>;
    /// Cell values in header order.
    fn to_row(&self) -> Vec<String>;
}

fn opt(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

fn amount(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}")).unwrap_or_default()
}

/// One row per completion entry, with its expenses.
#[derive(Serialize, Clone, Debug)]
pub struct ExpenseExport {
    pub trip_id: u32,
    pub trip_name: String,
    pub completed_at: String,
    pub trip_item_id: u32,
    pub company: String,
    pub product: String,
    pub product_code: Option<String>,
    pub duty_type: String,
    pub assignees: String,
    pub performed_at: Option<String>,
    pub inspected_at: Option<String>,
    pub tracking_code: Option<String>,
    pub transport_mode: Option<String>,
    pub vehicle_plate: Option<String>,
    pub lodging_provider: Option<String>,
    pub lodging_payment: Option<f64>,
    pub transport_expense: Option<f64>,
    pub meal_lunch: Option<f64>,
    pub meal_dinner: Option<f64>,
    pub company_expense: Option<f64>,
    pub total: f64,
}

impl ExpenseExport {
    pub fn from_entry(
        maps: &EntityMaps<'_>,
        completion: &TripCompletion,
        entry: &TripCompletionEntry,
    ) -> Self {
        let trip_name = maps
            .trips
            .get(&completion.trip_id)
            .map(|t| t.display_name())
            .unwrap_or_else(|| "-".into());

        let cp = maps
            .trip_items
            .get(&entry.trip_item_id)
            .and_then(|item| maps.company_product_of(item));

        Self {
            trip_id: completion.trip_id,
            trip_name,
            completed_at: completion.created_at.clone(),
            trip_item_id: entry.trip_item_id,
            company: cp.map(|cp| maps.company_name(cp)).unwrap_or_else(|| "-".into()),
            product: cp.map(|cp| maps.product_name(cp)).unwrap_or_else(|| "-".into()),
            product_code: cp.and_then(|cp| cp.product_code.clone()),
            duty_type: entry.duty_type.unwrap_or_default().code().to_string(),
            assignees: maps.employee_names(&entry.duty_assignee_ids),
            performed_at: entry.performed_at.clone(),
            inspected_at: entry.inspected_at.clone(),
            tracking_code: entry.tracking_code.clone(),
            transport_mode: completion.transport_mode.map(|m| m.code().to_string()),
            vehicle_plate: completion.vehicle_plate.clone(),
            lodging_provider: completion.lodging_provider.map(|l| l.code().to_string()),
            lodging_payment: entry.lodging_payment_amount,
            transport_expense: entry.transport_expense,
            meal_lunch: entry.meal_lunch_expense,
            meal_dinner: entry.meal_dinner_expense,
            company_expense: entry.company_expense,
            total: entry.total_expense(),
        }
    }
}

impl ExportRecord for ExpenseExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "trip_id",
            "trip_name",
            "completed_at",
            "trip_item_id",
            "company",
            "product",
            "product_code",
            "duty_type",
            "assignees",
            "performed_at",
            "inspected_at",
            "tracking_code",
            "transport_mode",
            "vehicle_plate",
            "lodging_provider",
            "lodging_payment",
            "transport_expense",
            "meal_lunch",
            "meal_dinner",
            "company_expense",
            "total",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.trip_id.to_string(),
            self.trip_name.clone(),
            self.completed_at.clone(),
            self.trip_item_id.to_string(),
            self.company.clone(),
            self.product.clone(),
            opt(&self.product_code),
            self.duty_type.clone(),
            self.assignees.clone(),
            opt(&self.performed_at),
            opt(&self.inspected_at),
            opt(&self.tracking_code),
            opt(&self.transport_mode),
            opt(&self.vehicle_plate),
            opt(&self.lodging_provider),
            amount(self.lodging_payment),
            amount(self.transport_expense),
            amount(self.meal_lunch),
            amount(self.meal_dinner),
            amount(self.company_expense),
            format!("{:.2}", self.total),
        ]
    }
}

/// One row of the due list.
#[derive(Serialize, Clone, Debug)]
pub struct DueExport {
    pub company_product_id: u32,
    pub company: String,
    pub customer_code: Option<String>,
    pub product: String,
    pub product_type: String,
    pub standard_no: Option<String>,
    pub location: String,
    pub product_code: Option<String>,
    pub status: String,
    pub last_sample_date: Option<String>,
    pub next_sample_due: Option<String>,
    pub sample_priority: String,
    pub last_inspection_date: Option<String>,
    pub next_inspection_due: Option<String>,
    pub inspection_priority: String,
    pub score: u32,
    pub sample_count: u32,
    pub sample_quota: u32,
}

impl DueExport {
    pub fn from_row(row: &DueRow<'_>) -> Self {
        Self {
            company_product_id: row.cp.id,
            company: row.company.name.clone(),
            customer_code: row.company.customer_code.clone(),
            product: row.product.name.trim().to_string(),
            product_type: row.product.product_type.code().to_string(),
            standard_no: row.product.standard_no.clone(),
            location: row
                .site
                .map(|s| s.location_label())
                .unwrap_or_else(|| "-".into()),
            product_code: row.cp.product_code.clone(),
            status: row.cp.status.code().to_string(),
            last_sample_date: row.cp.last_sample_date.clone(),
            next_sample_due: row.report.next_sample_due.map(|d| d.to_string()),
            sample_priority: row.report.sample.code().to_string(),
            last_inspection_date: row.cp.last_inspection_date.clone(),
            next_inspection_due: row.report.next_inspection_due.map(|d| d.to_string()),
            inspection_priority: row.report.inspection.code().to_string(),
            score: row.report.score,
            sample_count: row.sample_count,
            sample_quota: row.sample_quota,
        }
    }
}

impl ExportRecord for DueExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "company_product_id",
            "company",
            "customer_code",
            "product",
            "product_type",
            "standard_no",
            "location",
            "product_code",
            "status",
            "last_sample_date",
            "next_sample_due",
            "sample_priority",
            "last_inspection_date",
            "next_inspection_due",
            "inspection_priority",
            "score",
            "sample_count",
            "sample_quota",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.company_product_id.to_string(),
            self.company.clone(),
            opt(&self.customer_code),
            self.product.clone(),
            self.product_type.clone(),
            opt(&self.standard_no),
            self.location.clone(),
            opt(&self.product_code),
            self.status.clone(),
            opt(&self.last_sample_date),
            opt(&self.next_sample_due),
            self.sample_priority.clone(),
            opt(&self.last_inspection_date),
            opt(&self.next_inspection_due),
            self.inspection_priority.clone(),
            self.score.to_string(),
            self.sample_count.to_string(),
            self.sample_quota.to_string(),
        ]
    }
}
