//! Feature space used for item similarity
//!
//! Each item maps to `(price, avg_rating, diet code)`. Coordinates are
//! raw, not normalized, so price differences dominate the distance.

use foodans_core::{ItemRecord, ScoredItem};

/// Raw similarity coordinates of one item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub price: f64,
    pub avg_rating: f64,
    pub food_type_code: f64,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(price: f64, avg_rating: f64, food_type_code: f64) -> Self {
        Self {
            price,
            avg_rating,
            food_type_code,
        }
    }

    #[inline]
    pub fn as_array(&self) -> [f64; 3] {
        [self.price, self.avg_rating, self.food_type_code]
    }

    /// Euclidean distance
    #[inline]
    pub fn distance(&self, other: &FeatureVector) -> f64 {
        self.squared_distance(other).sqrt()
    }

    #[inline]
    pub fn squared_distance(&self, other: &FeatureVector) -> f64 {
        self.as_array()
            .iter()
            .zip(other.as_array().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

impl From<&ItemRecord> for FeatureVector {
    fn from(record: &ItemRecord) -> Self {
        Self::new(record.price, record.avg_rating, record.food_type.code())
    }
}

impl From<&ScoredItem> for FeatureVector {
    fn from(item: &ScoredItem) -> Self {
        Self::from(&item.record)
    }
}
