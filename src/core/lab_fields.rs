//! Result fields the laboratory fills in, per product standard.

pub const DEFAULT_STANDARD: &str = "TS EN 206";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabField {
    pub key: &'static str,
    pub label: &'static str,
}

const fn field(key: &'static str, label: &'static str) -> LabField {
    LabField { key, label }
}

const TS_EN_206: &[LabField] = &[
    field("day7", "7-day compressive strength (MPa)"),
    field("day28", "28-day compressive strength (MPa)"),
    field("remarks", "Remarks"),
];

const TS_EN_197_1: &[LabField] = &[
    field("initialSetting", "Initial setting time (min)"),
    field("expansion", "Soundness / expansion (mm)"),
    field("strength", "Compressive strength (MPa)"),
];

/// Fields for `standard_no`; unknown or missing standards use `TS EN 206`.
pub fn fields_for(standard_no: Option<&str>) -> &'static [LabField] {
    match standard_no.map(str::trim) {
        Some("TS EN 197-1") => TS_EN_197_1,
        _ => TS_EN_206,
    }
}

/// Keys of `fields` with no non-blank value in `data`.
pub fn missing_fields<'a>(
    fields: &'a [LabField],
    data: &std::collections::BTreeMap<String, String>,
) -> Vec<&'a LabField> {
    fields
        .iter()
        .filter(|f| data.get(f.key).is_none_or(|v| v.trim().is_empty()))
        .collect()
}

pub fn label_for(standard_no: Option<&str>, key: &str) -> String {
    fields_for(standard_no)
        .iter()
        .find(|f| f.key == key)
        .map(|f| f.label.to_string())
        .unwrap_or_else(|| key.to_string())
}
