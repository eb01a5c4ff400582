//! Similarity fallback for searches that come back empty
//!
//! A category search that matches nothing is relaxed by anchoring on the
//! first item of that category (after the diet filter) and suggesting its
//! nearest neighbors that share the category and diet.

use crate::cache::NeighborSource;
use crate::index::resolve;
use foodans_core::{Catalog, DietPreference, Error, Result, ScoredItem};

/// Neighbors shown when a vendor has nothing in the browsed category
pub const VENDOR_BROWSE_SUGGESTIONS: usize = 2;
/// Neighbors shown after a category search: next to the top hit, in place
/// of an empty result, and after an empty next-course plan
pub const CATEGORY_SEARCH_SUGGESTIONS: usize = 3;

/// First item of `category` allowed by `diet`, in catalog order
pub fn find_anchor<'a>(
    catalog: &'a Catalog,
    category: &str,
    diet: DietPreference,
) -> Result<&'a ScoredItem> {
    catalog
        .by_category(category)
        .into_iter()
        .find(|item| diet.allows(item.food_type()))
        .ok_or_else(|| Error::CategoryNotFound(category.to_string()))
}

/// Suggestions near `anchor`
///
/// Takes the first `take` neighbors (the anchor itself included) and keeps
/// those matching `category` and `diet`, so fewer than `take` may remain.
pub fn similar_to<'a, S>(
    catalog: &'a Catalog,
    source: &S,
    anchor: &ScoredItem,
    category: &str,
    diet: DietPreference,
    take: usize,
) -> Result<Vec<&'a ScoredItem>>
where
    S: NeighborSource + ?Sized,
{
    let neighbors = source.neighbors(anchor)?;
    let nearest = &neighbors[..take.min(neighbors.len())];
    Ok(resolve(catalog, nearest)
        .into_iter()
        .filter(|item| item.category() == category && diet.allows(item.food_type()))
        .collect())
}

/// Suggestions for a category search that matched nothing
///
/// Fails with [`Error::CategoryNotFound`] when no anchor exists.
pub fn similar_in_category<'a, S>(
    catalog: &'a Catalog,
    source: &S,
    category: &str,
    diet: DietPreference,
    take: usize,
) -> Result<Vec<&'a ScoredItem>>
where
    S: NeighborSource + ?Sized,
{
    let anchor = find_anchor(catalog, category, diet)?;
    tracing::debug!(
        "Similarity fallback for {:?} anchored on {:?} at {:?}",
        category,
        anchor.item_name(),
        anchor.vendor_name()
    );
    similar_to(catalog, source, anchor, category, diet, take)
}
