// src/export/logic.rs

use crate::config::Config;
use crate::core::due::{DueFilters, build_due_list};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{DueExport, ExpenseExport, ExportRecord};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportReport};
use crate::store::AppState;
use crate::ui::messages::warning;
use crate::utils::date::{parse_opt, period_bounds};
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export a report.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a period: `YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD`, or two of them joined by `:`
    ///
    /// Returns the number of records written.
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        state: &AppState,
        cfg: &Config,
        today: NaiveDate,
        report: ExportReport,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path_buf = expand_tilde(file);
        let path = path_buf.as_path();

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(period_bounds(r).map_err(AppError::InvalidDate)?),
        };

        ensure_writable(path, force)?;

        match report {
            ExportReport::Expenses => {
                let records = expense_records(state, bounds);
                write_records("expenses", "Expenses", &records, format, path)
            }
            ExportReport::Due => {
                let records = due_records(state, cfg, today, bounds);
                write_records("due list", "Due", &records, format, path)
            }
        }
    }
}

fn write_records<T: ExportRecord>(
    label: &str,
    sheet: &str,
    records: &[T],
    format: ExportFormat,
    path: &Path,
) -> AppResult<usize> {
    if records.is_empty() {
        warning(format!("No {label} found for the selected range."));
    }

    match format {
        ExportFormat::Csv => export_csv(label, records, path)?,
        ExportFormat::Json => export_json(label, records, path)?,
        ExportFormat::Xlsx => export_xlsx(label, sheet, records, path)?,
    }

    Ok(records.len())
}

fn in_bounds(date: Option<NaiveDate>, bounds: Option<(NaiveDate, NaiveDate)>) -> bool {
    match (bounds, date) {
        (None, _) => true,
        (Some((start, end)), Some(d)) => d >= start && d <= end,
        (Some(_), None) => false,
    }
}

/// Completion entries dated (sample, else inspection, else completion)
/// inside `bounds`.
pub fn expense_records(
    state: &AppState,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> Vec<ExpenseExport> {
    let maps = state.maps();

    state
        .trip_completions
        .iter()
        .flat_map(|c| c.entries.iter().map(move |e| (c, e)))
        .filter(|(c, e)| {
            let date = parse_opt(e.performed_at.as_deref())
                .or_else(|| parse_opt(e.inspected_at.as_deref()))
                .or_else(|| parse_opt(Some(c.created_at.as_str())));
            in_bounds(date, bounds)
        })
        .map(|(c, e)| ExpenseExport::from_entry(&maps, c, e))
        .collect()
}

/// Due list rows whose next sample or inspection falls inside `bounds`.
pub fn due_records(
    state: &AppState,
    cfg: &Config,
    today: NaiveDate,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> Vec<DueExport> {
    let cycles = cfg.sampling_cycles;
    let policy = cfg.inspection_policy();

    build_due_list(state, &cycles, &policy, today, &DueFilters::default())
        .iter()
        .filter(|row| {
            in_bounds(row.report.next_sample_due, bounds)
                || in_bounds(row.report.next_inspection_due, bounds)
        })
        .map(DueExport::from_row)
        .collect()
}
