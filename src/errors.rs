//! Unified application error type.
//! All modules (store, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Snapshot-related
    // ---------------------------
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Snapshot not found: {0} (run `labtrack init` first)")]
    SnapshotMissing(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Trip not found: {0}")]
    TripNotFound(u32),

    #[error("Trip item not found: {0}")]
    TripItemNotFound(u32),

    #[error("Company product not found: {0}")]
    CompanyProductNotFound(u32),

    #[error("No lab form for trip item {0}")]
    LabFormNotFound(u32),

    // ---------------------------
    // Workflow errors
    // ---------------------------
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Lab entry code could not be generated for trip item {0}: check product code and sample date")]
    TrackingCode(u32),

    #[error("Document '{name}' exceeds the {limit} byte limit ({size} bytes)")]
    DocumentTooLarge { name: String, size: u64, limit: u64 },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
