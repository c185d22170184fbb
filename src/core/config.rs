use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::ProductType;
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Default editor for the platform: $EDITOR, $VISUAL, then notepad/nano.
    pub fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    /// Open `path` in `editor`, falling back to the default editor.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = Self::default_editor();
        let editor_to_use = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
                Ok(())
            }
            _ => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));

                match Command::new(&default_editor).arg(path).status() {
                    Ok(s) if s.success() => {
                        success(format!(
                            "Configuration file edited successfully using fallback '{}'",
                            default_editor
                        ));
                        Ok(())
                    }
                    _ => Err(AppError::Config(format!(
                        "failed to edit configuration file using '{}'",
                        default_editor
                    ))),
                }
            }
        }
    }

    /// Parse "TYPE=MONTHS" and apply it to the sampling cycles.
    pub fn apply_cycle(cfg: &mut Config, assignment: &str) -> AppResult<(ProductType, u32)> {
        let (pt, months) = assignment.split_once('=').ok_or_else(|| AppError::InvalidValue {
            field: "cycle",
            value: assignment.to_string(),
        })?;

        let product_type = ProductType::from_code(pt.trim()).ok_or_else(|| AppError::InvalidValue {
            field: "product type",
            value: pt.to_string(),
        })?;

        let months = months
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| AppError::InvalidValue {
                field: "months",
                value: months.to_string(),
            })?;

        cfg.sampling_cycles.set(product_type, months);
        Ok((product_type, months))
    }
}
