//! Company product registry. Records are never removed: `iptal` archives.

use crate::errors::{AppError, AppResult};
use crate::models::{CompanyProduct, CompanyProductStatus, PaymentStatus};
use crate::store::AppState;
use crate::store::log::ttlog;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCompanyProduct {
    pub company_id: u32,
    pub product_id: u32,
    pub site_id: Option<u32>,
    pub product_code: Option<String>,
    pub certificate_no: Option<String>,
    pub certificate_date: Option<String>,
    pub last_sample_date: Option<String>,
    pub last_inspection_date: Option<String>,
    pub status: Option<CompanyProductStatus>,
    pub payment_status: Option<PaymentStatus>,
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyProductChanges {
    pub site_id: Option<u32>,
    pub product_code: Option<String>,
    pub certificate_no: Option<String>,
    pub certificate_date: Option<String>,
    pub last_sample_date: Option<String>,
    pub last_inspection_date: Option<String>,
    pub payment_status: Option<PaymentStatus>,
}

pub fn add_company_product(state: &mut AppState, input: NewCompanyProduct) -> AppResult<u32> {
    if !state.companies.iter().any(|c| c.id == input.company_id) {
        return Err(AppError::Validation(format!("unknown company {}", input.company_id)));
    }
    if !state.products.iter().any(|p| p.id == input.product_id) {
        return Err(AppError::Validation(format!("unknown product {}", input.product_id)));
    }

    let id = state.next_company_product_id();
    let cp = CompanyProduct {
        site_id: input.site_id,
        product_code: input.product_code,
        certificate_no: input.certificate_no,
        certificate_date: input.certificate_date,
        last_sample_date: input.last_sample_date,
        last_inspection_date: input.last_inspection_date,
        status: input.status.unwrap_or_default(),
        payment_status: input.payment_status,
        ..CompanyProduct::new(id, input.company_id, input.product_id)
    };

    let code = cp.product_code.clone().unwrap_or_else(|| "-".into());
    state.company_products.push(cp);
    ttlog(state, "cp_add", &format!("cp {id}"), &format!("Added company product {code}"));

    Ok(id)
}

fn cp_mut(state: &mut AppState, id: u32) -> AppResult<&mut CompanyProduct> {
    state
        .company_products
        .iter_mut()
        .find(|cp| cp.id == id)
        .ok_or(AppError::CompanyProductNotFound(id))
}

pub fn update_company_product(
    state: &mut AppState,
    id: u32,
    changes: CompanyProductChanges,
) -> AppResult<()> {
    let cp = cp_mut(state, id)?;

    if let Some(v) = changes.site_id {
        cp.site_id = Some(v);
    }
    if let Some(v) = changes.product_code {
        cp.product_code = Some(v);
    }
    if let Some(v) = changes.certificate_no {
        cp.certificate_no = Some(v);
    }
    if let Some(v) = changes.certificate_date {
        cp.certificate_date = Some(v);
    }
    if let Some(v) = changes.last_sample_date {
        cp.last_sample_date = Some(v);
    }
    if let Some(v) = changes.last_inspection_date {
        cp.last_inspection_date = Some(v);
    }
    if let Some(v) = changes.payment_status {
        cp.payment_status = Some(v);
    }

    ttlog(state, "cp_edit", &format!("cp {id}"), "Company product updated");
    Ok(())
}

pub fn set_company_product_status(
    state: &mut AppState,
    id: u32,
    status: CompanyProductStatus,
) -> AppResult<()> {
    let cp = cp_mut(state, id)?;
    let previous = cp.status;
    cp.status = status;

    ttlog(
        state,
        "cp_status",
        &format!("cp {id}"),
        &format!("{} -> {}", previous.code(), status.code()),
    );
    Ok(())
}
