pub mod config;
pub mod cp;
pub mod cycles;
pub mod dashboard;
pub mod due;
pub mod employees;
pub mod export;
pub mod init;
pub mod lab;
pub mod log;
pub mod trip;

use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;
use crate::utils::formatting::parse_id_list;

/// Parse a comma separated id list given to `field`.
pub(crate) fn ids_arg(field: &'static str, value: &str) -> AppResult<Vec<u32>> {
    parse_id_list(value).map_err(|_| AppError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

/// Parse an optional coded value with `from_code`.
pub(crate) fn code_arg<T>(
    field: &'static str,
    value: Option<&str>,
    from_code: impl Fn(&str) -> Option<T>,
) -> AppResult<Option<T>> {
    value
        .map(|v| {
            from_code(v.trim()).ok_or_else(|| AppError::InvalidValue {
                field,
                value: v.to_string(),
            })
        })
        .transpose()
}

/// Check that `value` reads as a date and return it unchanged.
pub(crate) fn date_arg(value: &str) -> AppResult<String> {
    let value = value.trim();
    parse_date(value)
        .map(|_| value.to_string())
        .ok_or_else(|| AppError::InvalidDate(value.to_string()))
}

pub(crate) fn opt_date_arg(value: Option<&str>) -> AppResult<Option<String>> {
    value.map(date_arg).transpose()
}
