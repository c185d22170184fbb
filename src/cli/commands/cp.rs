use super::{code_arg, opt_date_arg};
use crate::cli::parser::{Commands, CpCommand};
use crate::config::Config;
use crate::core::company_products::{
    CompanyProductChanges, NewCompanyProduct, add_company_product, set_company_product_status,
    update_company_product,
};
use crate::errors::AppResult;
use crate::models::{CompanyProductStatus, PaymentStatus};
use crate::store::snapshot::Snapshot;
use crate::ui::messages::{header, info, success};
use crate::utils::date::format_date;
use crate::utils::formatting::{opt_str, truncate};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Cp { action } = cmd else {
        return Ok(());
    };

    match action {
        CpCommand::List { status, all } => {
            let status = code_arg("status", status.as_deref(), CompanyProductStatus::from_code)?;
            let state = Snapshot::load(&cfg.data_file)?;
            let maps = state.maps();

            header("Company products");
            let mut table = Table::new(&[
                "ID", "COMPANY", "PRODUCT", "CODE", "LOCATION", "CERTIFICATE", "STATUS", "PAYMENT",
            ])
            .with_separator(&cfg.separator_char);

            for cp in &state.company_products {
                let shown = match status {
                    Some(s) => cp.status == s,
                    None => *all || cp.status != CompanyProductStatus::Iptal,
                };
                if !shown {
                    continue;
                }
                table.add_row(vec![
                    cp.id.to_string(),
                    truncate(&maps.company_name(cp), 28),
                    truncate(&maps.product_name(cp), 24),
                    opt_str(cp.product_code.as_deref()),
                    maps.location(cp),
                    format!(
                        "{} ({})",
                        opt_str(cp.certificate_no.as_deref()),
                        format_date(cp.certificate_date.as_deref())
                    ),
                    cp.status.label().to_string(),
                    cp.payment_status
                        .map(|p| p.label().to_string())
                        .unwrap_or_else(|| "-".into()),
                ]);
            }

            if table.is_empty() {
                info("No company products found.");
            } else {
                print!("{}", table.render());
            }
        }

        CpCommand::Add {
            company,
            product,
            site,
            code,
            certificate,
            certificate_date,
            last_sample,
            last_inspection,
            status,
            payment,
        } => {
            let input = NewCompanyProduct {
                company_id: *company,
                product_id: *product,
                site_id: *site,
                product_code: code.clone(),
                certificate_no: certificate.clone(),
                certificate_date: opt_date_arg(certificate_date.as_deref())?,
                last_sample_date: opt_date_arg(last_sample.as_deref())?,
                last_inspection_date: opt_date_arg(last_inspection.as_deref())?,
                status: code_arg("status", status.as_deref(), CompanyProductStatus::from_code)?,
                payment_status: code_arg("payment", payment.as_deref(), PaymentStatus::from_code)?,
            };

            let id = Snapshot::with_state(&cfg.data_file, |state| add_company_product(state, input))?;
            success(format!("Company product {id} added."));
        }

        CpCommand::Update {
            id,
            site,
            code,
            certificate,
            certificate_date,
            last_sample,
            last_inspection,
            payment,
        } => {
            let changes = CompanyProductChanges {
                site_id: *site,
                product_code: code.clone(),
                certificate_no: certificate.clone(),
                certificate_date: opt_date_arg(certificate_date.as_deref())?,
                last_sample_date: opt_date_arg(last_sample.as_deref())?,
                last_inspection_date: opt_date_arg(last_inspection.as_deref())?,
                payment_status: code_arg("payment", payment.as_deref(), PaymentStatus::from_code)?,
            };

            Snapshot::with_state(&cfg.data_file, |state| {
                update_company_product(state, *id, changes)
            })?;
            success(format!("Company product {id} updated."));
        }

        CpCommand::Status { id, status } => {
            let status = code_arg("status", Some(status.as_str()), CompanyProductStatus::from_code)?
                .unwrap_or_default();

            Snapshot::with_state(&cfg.data_file, |state| {
                set_company_product_status(state, *id, status)
            })?;
            success(format!("Company product {id} is now {}.", status.label()));
        }
    }

    Ok(())
}
