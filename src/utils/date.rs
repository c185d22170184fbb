use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn now_iso() -> String {
    chrono::Local::now().to_rfc3339()
}

/// Parse a stored date value.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` and RFC 3339 timestamps.
/// Returns `None` for anything else, including impossible calendar dates.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

pub fn parse_opt(s: Option<&str>) -> Option<NaiveDate> {
    s.and_then(parse_date)
}

/// Calendar-month difference between the months of `from` and `to`
/// (day of month ignored). Negative when `to` is earlier.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

pub fn add_months(d: NaiveDate, months: u32) -> Option<NaiveDate> {
    d.checked_add_months(Months::new(months))
}

/// "dd.mm.yyyy", or `fallback` when missing or unparseable.
pub fn format_date_or(value: Option<&str>, fallback: &str) -> String {
    parse_opt(value)
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| fallback.to_string())
}

pub fn format_date(value: Option<&str>) -> String {
    format_date_or(value, "-")
}

pub fn format_naive(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| "-".into())
}

/// First and last day covered by a period expression.
///
/// - `YYYY-MM-DD`
/// - `YYYY-MM`
/// - `YYYY`
/// - `A:B` with any of the above on each side
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some((start, end)) = p.split_once(':') {
        let (s, _) = single_period_bounds(start)?;
        let (_, e) = single_period_bounds(end)?;
        if e < s {
            return Err(format!("Invalid period: {} ends before it starts", p));
        }
        return Ok((s, e));
    }

    single_period_bounds(p)
}

fn single_period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let p = p.trim();

    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        let last = add_months(first, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| format!("Invalid period: {}", p))?;
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(format!("Invalid period: {}", p))
}
