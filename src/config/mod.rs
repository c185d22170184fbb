use crate::core::lab_fields::DEFAULT_STANDARD;
use crate::errors::{AppError, AppResult};
use crate::models::ProductType;
use crate::utils::path::{expand_tilde, resolve_in};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

/// Base sampling interval in months per product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingCycles {
    pub concrete: u32,
    pub cement: u32,
    pub slag: u32,
    pub fly_ash: u32,
}

impl Default for SamplingCycles {
    fn default() -> Self {
        Self {
            concrete: 4,
            cement: 2,
            slag: 2,
            fly_ash: 2,
        }
    }
}

impl SamplingCycles {
    pub fn months(&self, product_type: ProductType) -> u32 {
        match product_type {
            ProductType::Concrete => self.concrete,
            ProductType::Cement => self.cement,
            ProductType::Slag => self.slag,
            ProductType::FlyAsh => self.fly_ash,
        }
    }

    pub fn set(&mut self, product_type: ProductType, months: u32) {
        match product_type {
            ProductType::Concrete => self.concrete = months,
            ProductType::Cement => self.cement = months,
            ProductType::Slag => self.slag = months,
            ProductType::FlyAsh => self.fly_ash = months,
        }
    }
}

/// Inspection cadence: due every `cycle_months`, approaching from `warning_months`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectionPolicy {
    pub cycle_months: u32,
    pub warning_months: u32,
}

impl Default for InspectionPolicy {
    fn default() -> Self {
        Self {
            cycle_months: default_inspection_cycle(),
            warning_months: default_inspection_warning(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_file: String,
    #[serde(default)]
    pub sampling_cycles: SamplingCycles,
    #[serde(default = "default_inspection_cycle")]
    pub inspection_cycle_months: u32,
    #[serde(default = "default_inspection_warning")]
    pub inspection_warning_months: u32,
    #[serde(default = "default_lab_turnaround")]
    pub lab_turnaround_days: u32,
    #[serde(default = "default_max_document_size")]
    pub max_document_size: u64,
    #[serde(default = "default_standard")]
    pub default_standard: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_inspection_cycle() -> u32 {
    12
}
fn default_inspection_warning() -> u32 {
    10
}
fn default_lab_turnaround() -> u32 {
    30
}
fn default_max_document_size() -> u64 {
    5 * 1024 * 1024
}
fn default_standard() -> String {
    DEFAULT_STANDARD.to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_data_file(Self::data_file_path().to_string_lossy().to_string())
    }
}

impl Config {
    pub fn with_data_file(data_file: String) -> Self {
        Self {
            data_file,
            sampling_cycles: SamplingCycles::default(),
            inspection_cycle_months: default_inspection_cycle(),
            inspection_warning_months: default_inspection_warning(),
            lab_turnaround_days: default_lab_turnaround(),
            max_document_size: default_max_document_size(),
            default_standard: default_standard(),
            separator_char: default_separator_char(),
        }
    }

    pub fn inspection_policy(&self) -> InspectionPolicy {
        InspectionPolicy {
            cycle_months: self.inspection_cycle_months,
            warning_months: self.inspection_warning_months,
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("labtrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".labtrack")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("labtrack.conf")
    }

    /// Return the full path of the default state snapshot
    pub fn data_file_path() -> PathBuf {
        Self::config_dir().join("labtrack.json")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config =
            serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.data_file = expand_tilde(&cfg.data_file).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Write the configuration file (creating the directory if needed)
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(Self::config_file(), yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration for `init`.
    ///
    /// A custom data file is resolved against the config directory when relative.
    pub fn init_all(custom_data: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let data_path = match custom_data {
            Some(name) => resolve_in(&dir, &name, is_test),
            None => dir.join("labtrack.json"),
        };

        let config = Config::with_data_file(data_path.to_string_lossy().to_string());

        // Write config file
        if !is_test {
            config.save()?;
        }

        Ok(config)
    }
}
