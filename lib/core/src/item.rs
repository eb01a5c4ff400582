use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Diet classification of a single menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    Veg,
    #[serde(rename = "Non-Veg", alias = "NonVeg", alias = "Non Veg")]
    NonVeg,
}

impl FoodType {
    /// Numeric code used as the diet coordinate of a feature vector
    #[inline]
    #[must_use]
    pub fn code(self) -> f64 {
        match self {
            FoodType::Veg => 0.0,
            FoodType::NonVeg => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FoodType::Veg => "Veg",
            FoodType::NonVeg => "Non-Veg",
        }
    }
}

impl std::fmt::Display for FoodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | ' ' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "veg" => Ok(FoodType::Veg),
            "nonveg" => Ok(FoodType::NonVeg),
            _ => Err(s.to_string()),
        }
    }
}

/// One row of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub vendor_name: String,
    pub item_name: String,
    pub area: String,
    pub category: String,
    pub food_type: FoodType,
    pub price: f64,
    pub avg_rating: f64,
    pub total_order: u64,
}

/// A catalog record with its load-time score and catalog position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub record: ItemRecord,
    pub score: f64,
    /// Zero-based load order; the identity used by the similarity index
    pub position: usize,
}

impl ScoredItem {
    #[inline]
    #[must_use]
    pub fn new(record: ItemRecord, score: f64, position: usize) -> Self {
        Self {
            record,
            score,
            position,
        }
    }

    #[inline]
    pub fn vendor_name(&self) -> &str {
        &self.record.vendor_name
    }

    #[inline]
    pub fn item_name(&self) -> &str {
        &self.record.item_name
    }

    #[inline]
    pub fn area(&self) -> &str {
        &self.record.area
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.record.category
    }

    #[inline]
    pub fn food_type(&self) -> FoodType {
        self.record.food_type
    }
}
