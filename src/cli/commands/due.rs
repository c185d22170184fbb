use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::due::{DueFilters, DueRow, build_due_list, filter_values};
use crate::core::priority::PriorityFlag;
use crate::errors::{AppError, AppResult};
use crate::models::ProductType;
use crate::store::snapshot::Snapshot;
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::{color_for_priority, paint};
use crate::utils::date::{format_date, format_naive};
use crate::utils::formatting::truncate;
use crate::utils::table::Table;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::Due {
        product_type,
        city,
        standard,
        customer,
        priority,
    } = cmd
    {
        let product_types = product_type
            .iter()
            .map(|pt| {
                ProductType::from_code(pt).ok_or_else(|| AppError::InvalidValue {
                    field: "product type",
                    value: pt.clone(),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let priority = super::code_arg("priority", priority.as_deref(), PriorityFlag::from_code)?;

        let filters = DueFilters {
            product_types,
            city: city.clone(),
            standard_no: standard.clone(),
            customer_code: customer.clone(),
            priority,
        };

        let state = Snapshot::load(&cfg.data_file)?;
        let rows = build_due_list(
            &state,
            &cfg.sampling_cycles,
            &cfg.inspection_policy(),
            today,
            &filters,
        );

        header(format!("Due list at {}", today.format("%d.%m.%Y")));

        if rows.is_empty() {
            warning("No company products match the selected filters.");
            let (cities, standards) = filter_values(&state);
            info(format!("Cities: {}", cities.join(", ")));
            info(format!("Standards: {}", standards.join(", ")));
            return Ok(());
        }

        print!("{}", render_due_table(&rows, &cfg.separator_char));
        println!("\n{} company product(s)", rows.len());
    }

    Ok(())
}

/// Due rows as a table; shared with the dashboard.
pub(crate) fn render_due_table(rows: &[DueRow<'_>], separator: &str) -> String {
    let mut table = Table::new(&[
        "ID",
        "COMPANY",
        "PRODUCT",
        "TYPE",
        "LOCATION",
        "STATUS",
        "LAST SAMPLE",
        "NEXT SAMPLE",
        "SAMPLE",
        "LAST INSP.",
        "INSPECTION",
        "YEAR",
        "SCORE",
    ])
    .with_separator(separator);

    for row in rows {
        let sample = row.report.sample;
        let inspection = row.report.inspection;
        table.add_row(vec![
            paint(&row.cp.id.to_string(), color_for_priority(row.report.worst())),
            truncate(&row.company.name, 28),
            truncate(row.product.name.trim(), 24),
            row.product.product_type.label().to_string(),
            row.site.map(|s| s.location_label()).unwrap_or_else(|| "-".into()),
            row.cp.status.code().to_string(),
            format_date(row.cp.last_sample_date.as_deref()),
            format_naive(row.report.next_sample_due),
            paint(sample.label(), color_for_priority(sample)),
            format_date(row.cp.last_inspection_date.as_deref()),
            paint(inspection.label(), color_for_priority(inspection)),
            format!("{}/{}", row.sample_count, row.sample_quota),
            row.report.score.to_string(),
        ]);
    }

    table.render()
}
