use serde::{Deserialize, Serialize};

/// Product family. Selects the base sampling interval and the lab field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Concrete,
    Cement,
    Slag,
    FlyAsh,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        ProductType::Concrete,
        ProductType::Cement,
        ProductType::Slag,
        ProductType::FlyAsh,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ProductType::Concrete => "concrete",
            ProductType::Cement => "cement",
            ProductType::Slag => "slag",
            ProductType::FlyAsh => "fly_ash",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Concrete => "Concrete",
            ProductType::Cement => "Cement",
            ProductType::Slag => "Slag",
            ProductType::FlyAsh => "Fly ash",
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase, `-` or `_`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().replace('-', "_").as_str() {
            "concrete" => Some(ProductType::Concrete),
            "cement" => Some(ProductType::Cement),
            "slag" => Some(ProductType::Slag),
            "fly_ash" | "flyash" => Some(ProductType::FlyAsh),
            _ => None,
        }
    }
}
