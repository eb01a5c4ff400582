//! Composite desirability score
//!
//! `score = 0.6 * avg_rating + 0.4 * (total_order / max_total_order)`.
//! The maximum is taken once over the whole catalog at load time so that
//! rankings never shift between queries.

use crate::item::ItemRecord;

pub const RATING_WEIGHT: f64 = 0.6;
pub const POPULARITY_WEIGHT: f64 = 0.4;

/// Score a record against the catalog-wide order maximum
#[inline]
pub fn score(record: &ItemRecord, max_total_order: u64) -> f64 {
    let popularity = if max_total_order == 0 {
        0.0
    } else {
        record.total_order as f64 / max_total_order as f64
    };
    RATING_WEIGHT * record.avg_rating + POPULARITY_WEIGHT * popularity
}

/// Largest `total_order` among the records, 0 for an empty slice
pub fn max_total_order(records: &[ItemRecord]) -> u64 {
    records.iter().map(|r| r.total_order).max().unwrap_or(0)
}
