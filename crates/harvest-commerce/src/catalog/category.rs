//! Product categories.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Fixed category list from the marketplace backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetables,
    Fruits,
    Grains,
    Cereals,
    Pulses,
    Spices,
    Herbs,
    Dairy,
    Oils,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetables => "vegetables",
            Category::Fruits => "fruits",
            Category::Grains => "grains",
            Category::Cereals => "cereals",
            Category::Pulses => "pulses",
            Category::Spices => "spices",
            Category::Herbs => "herbs",
            Category::Dairy => "dairy",
            Category::Oils => "oils",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::Grains => "Grains",
            Category::Cereals => "Cereals",
            Category::Pulses => "Pulses",
            Category::Spices => "Spices",
            Category::Herbs => "Herbs",
            Category::Dairy => "Dairy",
            Category::Oils => "Oils",
        }
    }

    /// Parse from the wire value, case-insensitive.
    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        match s.to_lowercase().as_str() {
            "vegetables" => Ok(Category::Vegetables),
            "fruits" => Ok(Category::Fruits),
            "grains" => Ok(Category::Grains),
            "cereals" => Ok(Category::Cereals),
            "pulses" => Ok(Category::Pulses),
            "spices" => Ok(Category::Spices),
            "herbs" => Ok(Category::Herbs),
            "dairy" => Ok(Category::Dairy),
            "oils" => Ok(Category::Oils),
            other => Err(CommerceError::UnknownCategory(other.to_string())),
        }
    }

    /// All categories, in the backend's declaration order.
    pub fn all() -> [Category; 9] {
        [
            Category::Vegetables,
            Category::Fruits,
            Category::Grains,
            Category::Cereals,
            Category::Pulses,
            Category::Spices,
            Category::Herbs,
            Category::Dairy,
            Category::Oils,
        ]
    }

    /// The three-letter prefix the backend uses when minting product SKUs.
    pub fn sku_prefix(&self) -> &'static str {
        match self {
            Category::Vegetables => "VEG",
            Category::Fruits => "FRU",
            Category::Grains => "GRA",
            Category::Cereals => "CER",
            Category::Pulses => "PUL",
            Category::Spices => "SPI",
            Category::Herbs => "HER",
            Category::Dairy => "DAI",
            Category::Oils => "OIL",
        }
    }
}
