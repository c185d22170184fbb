//! In-memory application state and its JSON snapshot.
//!
//! Every operation in `core` takes `&mut AppState`, applies one whole update
//! and recomputes derived data before returning.

pub mod log;
pub mod maps;
pub mod seed;
pub mod snapshot;

pub use maps::EntityMaps;

use crate::models::{
    Company, CompanyProduct, Employee, Lab, LabForm, LogEntry, Product, Site, Trip,
    TripCompletion, TripItem,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub company_products: Vec<CompanyProduct>,
    #[serde(default)]
    pub labs: Vec<Lab>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub trip_items: Vec<TripItem>,
    #[serde(default)]
    pub lab_forms: Vec<LabForm>,
    #[serde(default)]
    pub trip_completions: Vec<TripCompletion>,
    #[serde(default)]
    pub log: Vec<LogEntry>,
}

/// Next free id in a collection (max + 1, starting at 1).
pub fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> u32) -> u32 {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}

impl AppState {
    pub fn maps(&self) -> EntityMaps<'_> {
        EntityMaps::new(self)
    }

    /// Also skips ids referenced by orphan trip items, so a new trip never
    /// adopts items left behind by a trip that no longer exists.
    pub fn next_trip_id(&self) -> u32 {
        let orphan_max = self.trip_items.iter().map(|i| i.trip_id).max().unwrap_or(0);
        next_id(&self.trips, |t| t.id).max(orphan_max + 1)
    }

    pub fn next_trip_item_id(&self) -> u32 {
        next_id(&self.trip_items, |t| t.id)
    }

    pub fn next_company_product_id(&self) -> u32 {
        next_id(&self.company_products, |cp| cp.id)
    }

    pub fn next_lab_form_id(&self) -> u32 {
        next_id(&self.lab_forms, |f| f.id)
    }

    pub fn trip(&self, id: u32) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id)
    }

    pub fn trip_item(&self, id: u32) -> Option<&TripItem> {
        self.trip_items.iter().find(|t| t.id == id)
    }

    pub fn company_product(&self, id: u32) -> Option<&CompanyProduct> {
        self.company_products.iter().find(|cp| cp.id == id)
    }

    pub fn lab_form_for(&self, trip_item_id: u32) -> Option<&LabForm> {
        self.lab_forms.iter().find(|f| f.trip_item_id == trip_item_id)
    }

    pub fn completion_for(&self, trip_id: u32) -> Option<&TripCompletion> {
        self.trip_completions.iter().find(|c| c.trip_id == trip_id)
    }

    pub fn items_of_trip(&self, trip_id: u32) -> impl Iterator<Item = &TripItem> {
        self.trip_items.iter().filter(move |i| i.trip_id == trip_id)
    }
}
