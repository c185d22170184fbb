//! JSON snapshot of the application state (lightweight for CLI usage).

use super::AppState;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;

pub struct Snapshot;

impl Snapshot {
    /// Load the state from `path`. A missing file is an error: `init` creates it.
    pub fn load(path: &str) -> AppResult<AppState> {
        let p = Path::new(path);
        if !p.exists() {
            return Err(AppError::SnapshotMissing(path.to_string()));
        }
        let content = fs::read_to_string(p)?;
        let state = serde_json::from_str(&content)?;
        Ok(state)
    }

    /// Write the state to `path`, creating parent directories when needed.
    pub fn save(path: &str, state: &AppState) -> AppResult<()> {
        let p = Path::new(path);
        if let Some(parent) = p.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(p, json)?;
        Ok(())
    }

    /// Load, apply `func`, save. The state is written only if `func` succeeds.
    pub fn with_state<F, T>(path: &str, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut AppState) -> AppResult<T>,
    {
        let mut state = Self::load(path)?;
        let out = func(&mut state)?;
        Self::save(path, &state)?;
        Ok(out)
    }
}
