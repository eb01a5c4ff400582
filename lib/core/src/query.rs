use crate::item::{FoodType, ScoredItem};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User diet filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DietPreference {
    #[default]
    Both,
    Veg,
    #[serde(rename = "Non-Veg", alias = "NonVeg", alias = "Non Veg")]
    NonVeg,
}

impl DietPreference {
    /// The food type this preference restricts to, `None` for `Both`
    #[inline]
    pub fn food_type(self) -> Option<FoodType> {
        match self {
            DietPreference::Both => None,
            DietPreference::Veg => Some(FoodType::Veg),
            DietPreference::NonVeg => Some(FoodType::NonVeg),
        }
    }

    #[inline]
    pub fn allows(self, food_type: FoodType) -> bool {
        self.food_type().map_or(true, |wanted| wanted == food_type)
    }
}

impl FromStr for DietPreference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("both") {
            return Ok(DietPreference::Both);
        }
        match s.parse::<FoodType>() {
            Ok(FoodType::Veg) => Ok(DietPreference::Veg),
            Ok(FoodType::NonVeg) => Ok(DietPreference::NonVeg),
            Err(_) => Err(Error::InvalidBand(format!("unknown diet preference {s:?}"))),
        }
    }
}

/// Inclusive numeric range; `max` may be infinite
///
/// An infinite `max` travels as `null` (or is omitted) on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub min: f64,
    #[serde(default = "unbounded", with = "open_max")]
    pub max: f64,
}

fn unbounded() -> f64 {
    f64::INFINITY
}

mod open_max {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(max: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if max.is_infinite() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(max)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

impl ValueRange {
    #[inline]
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    #[must_use]
    pub fn at_least(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    #[inline]
    #[must_use]
    pub fn any() -> Self {
        Self::new(0.0, f64::INFINITY)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::any()
    }
}

/// Price bands offered to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceBand {
    #[serde(rename = "0-50")]
    UpTo50,
    #[serde(rename = "51-100")]
    From51To100,
    #[serde(rename = "101-150")]
    From101To150,
    #[serde(rename = "151+")]
    Above150,
    #[serde(rename = "Any Price")]
    Any,
}

impl PriceBand {
    pub const ALL: [PriceBand; 5] = [
        PriceBand::UpTo50,
        PriceBand::From51To100,
        PriceBand::From101To150,
        PriceBand::Above150,
        PriceBand::Any,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PriceBand::UpTo50 => "0-50",
            PriceBand::From51To100 => "51-100",
            PriceBand::From101To150 => "101-150",
            PriceBand::Above150 => "151+",
            PriceBand::Any => "Any Price",
        }
    }

    pub fn range(self) -> ValueRange {
        match self {
            PriceBand::UpTo50 => ValueRange::new(0.0, 50.0),
            PriceBand::From51To100 => ValueRange::new(51.0, 100.0),
            PriceBand::From101To150 => ValueRange::new(101.0, 150.0),
            PriceBand::Above150 => ValueRange::at_least(151.0),
            PriceBand::Any => ValueRange::any(),
        }
    }
}

impl FromStr for PriceBand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|band| band.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidBand(format!("unknown price band {s:?}")))
    }
}

/// Rating bands offered to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingBand {
    #[serde(rename = "3.0-3.5")]
    From30To35,
    #[serde(rename = "3.5-4.0")]
    From35To40,
    #[serde(rename = "4.0-4.5")]
    From40To45,
    #[serde(rename = "4.5 and above")]
    Above45,
}

impl RatingBand {
    pub const ALL: [RatingBand; 4] = [
        RatingBand::From30To35,
        RatingBand::From35To40,
        RatingBand::From40To45,
        RatingBand::Above45,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RatingBand::From30To35 => "3.0-3.5",
            RatingBand::From35To40 => "3.5-4.0",
            RatingBand::From40To45 => "4.0-4.5",
            RatingBand::Above45 => "4.5 and above",
        }
    }

    pub fn range(self) -> ValueRange {
        match self {
            RatingBand::From30To35 => ValueRange::new(3.0, 3.5),
            RatingBand::From35To40 => ValueRange::new(3.5, 4.0),
            RatingBand::From40To45 => ValueRange::new(4.0, 4.5),
            RatingBand::Above45 => ValueRange::at_least(4.5),
        }
    }
}

impl FromStr for RatingBand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|band| band.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidBand(format!("unknown rating band {s:?}")))
    }
}

/// A compound item filter; every set predicate must hold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub diet: DietPreference,
    #[serde(default)]
    pub price: ValueRange,
    #[serde(default)]
    pub rating: ValueRange,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_diet(mut self, diet: DietPreference) -> Self {
        self.diet = diet;
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: ValueRange) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: ValueRange) -> Self {
        self.rating = rating;
        self
    }

    pub fn matches(&self, item: &ScoredItem) -> bool {
        let record = &item.record;
        self.area.as_deref().map_or(true, |a| record.area == a)
            && self.category.as_deref().map_or(true, |c| record.category == c)
            && self.diet.allows(record.food_type)
            && self.price.contains(record.price)
            && self.rating.contains(record.avg_rating)
    }
}
