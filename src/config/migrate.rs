use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Top-level keys present in the default configuration but missing from `content`.
pub fn missing_fields(content: &str) -> AppResult<Vec<String>> {
    let current: Value =
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
    let defaults = default_mapping()?;

    let present = current.as_mapping().cloned().unwrap_or_default();

    Ok(defaults
        .keys()
        .filter(|k| !present.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

fn default_mapping() -> AppResult<Mapping> {
    let value = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?;
    Ok(value.as_mapping().cloned().unwrap_or_default())
}

/// Report missing fields of the configuration file at `path`.
pub fn check(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let missing = missing_fields(&content)?;

    if missing.is_empty() {
        success("Configuration file is complete.");
    } else {
        for key in &missing {
            warning(format!("Missing field: {key}"));
        }
    }

    Ok(missing)
}

/// Add every missing field with its default value, keeping existing values.
///   Returns:
///   Ok(true)  → config updated
///   Ok(false) → no change needed
pub fn migrate(path: &Path) -> AppResult<bool> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let mut current: Value =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    let Some(map) = current.as_mapping_mut() else {
        return Err(AppError::Config("configuration root is not a mapping".into()));
    };

    let mut changed = false;
    for (key, value) in default_mapping()? {
        if !map.contains_key(&key) {
            info(format!(
                "Adding field '{}' with its default value",
                key.as_str().unwrap_or("?")
            ));
            map.insert(key, value);
            changed = true;
        }
    }

    if changed {
        let yaml = serde_yaml::to_string(&current).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
        success("Configuration migrated.");
    } else {
        info("Configuration already up to date.");
    }

    Ok(changed)
}
