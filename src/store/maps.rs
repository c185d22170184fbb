//! Id lookups over the state. Missing ids resolve to `None` and render as "-".

use super::AppState;
use crate::models::{
    Company, CompanyProduct, Employee, Lab, LabForm, Product, Site, Trip, TripItem,
};
use std::collections::HashMap;

pub fn map_by_id<T>(items: &[T], id_of: impl Fn(&T) -> u32) -> HashMap<u32, &T> {
    items.iter().map(|item| (id_of(item), item)).collect()
}

pub struct EntityMaps<'a> {
    pub companies: HashMap<u32, &'a Company>,
    pub sites: HashMap<u32, &'a Site>,
    pub products: HashMap<u32, &'a Product>,
    pub company_products: HashMap<u32, &'a CompanyProduct>,
    pub employees: HashMap<u32, &'a Employee>,
    pub labs: HashMap<u32, &'a Lab>,
    pub trips: HashMap<u32, &'a Trip>,
    pub trip_items: HashMap<u32, &'a TripItem>,
    /// Keyed by trip item id, not form id.
    pub lab_forms: HashMap<u32, &'a LabForm>,
}

impl<'a> EntityMaps<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            companies: map_by_id(&state.companies, |c| c.id),
            sites: map_by_id(&state.sites, |s| s.id),
            products: map_by_id(&state.products, |p| p.id),
            company_products: map_by_id(&state.company_products, |cp| cp.id),
            employees: map_by_id(&state.employees, |e| e.id),
            labs: map_by_id(&state.labs, |l| l.id),
            trips: map_by_id(&state.trips, |t| t.id),
            trip_items: map_by_id(&state.trip_items, |t| t.id),
            lab_forms: map_by_id(&state.lab_forms, |f| f.trip_item_id),
        }
    }

    pub fn product_of(&self, cp: &CompanyProduct) -> Option<&'a Product> {
        self.products.get(&cp.product_id).copied()
    }

    pub fn company_of(&self, cp: &CompanyProduct) -> Option<&'a Company> {
        self.companies.get(&cp.company_id).copied()
    }

    pub fn site_of(&self, cp: &CompanyProduct) -> Option<&'a Site> {
        cp.site_id.and_then(|id| self.sites.get(&id).copied())
    }

    pub fn company_product_of(&self, item: &TripItem) -> Option<&'a CompanyProduct> {
        self.company_products.get(&item.company_product_id).copied()
    }

    pub fn company_name(&self, cp: &CompanyProduct) -> String {
        self.company_of(cp)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "-".into())
    }

    pub fn product_name(&self, cp: &CompanyProduct) -> String {
        self.product_of(cp)
            .map(|p| p.name.trim().to_string())
            .unwrap_or_else(|| "-".into())
    }

    pub fn location(&self, cp: &CompanyProduct) -> String {
        self.site_of(cp)
            .map(|s| s.location_label())
            .unwrap_or_else(|| "-".into())
    }

    pub fn lab_name(&self, id: Option<u32>) -> String {
        id.and_then(|id| self.labs.get(&id))
            .map(|l| l.name.clone())
            .unwrap_or_else(|| "-".into())
    }

    /// Comma-separated employee names; unknown ids are skipped.
    pub fn employee_names(&self, ids: &[u32]) -> String {
        let names: Vec<&str> = ids
            .iter()
            .filter_map(|id| self.employees.get(id))
            .map(|e| e.name.as_str())
            .collect();
        if names.is_empty() {
            "-".into()
        } else {
            names.join(", ")
        }
    }
}
