//! Predicate filtering and stable ranking over the catalog

use crate::item::ScoredItem;
use crate::query::Query;
use crate::Catalog;

pub trait Filter {
    fn matches(&self, item: &ScoredItem) -> bool;
}

impl Filter for Query {
    fn matches(&self, item: &ScoredItem) -> bool {
        Query::matches(self, item)
    }
}

impl<F> Filter for F
where
    F: Fn(&ScoredItem) -> bool,
{
    fn matches(&self, item: &ScoredItem) -> bool {
        self(item)
    }
}

/// Items in `candidates` that pass `filter`, in input order
pub fn filter_items<'a, I>(candidates: I, filter: &dyn Filter) -> Vec<&'a ScoredItem>
where
    I: IntoIterator<Item = &'a ScoredItem>,
{
    candidates.into_iter().filter(|item| filter.matches(item)).collect()
}

/// Run a query against the catalog, best score first
///
/// Narrows through the area or category lookup when the query names one,
/// so the scan stays in catalog order either way. Never fails: no match
/// is an empty vector.
pub fn find<'a>(catalog: &'a Catalog, query: &Query) -> Vec<&'a ScoredItem> {
    let candidates = match (&query.category, &query.area) {
        (Some(category), _) => catalog.by_category(category),
        (None, Some(area)) => catalog.by_area(area),
        (None, None) => catalog.items().iter().collect(),
    };
    let mut results = filter_items(candidates, query);
    rank_by_score(&mut results);
    results
}

/// Stable sort by score, descending; equal scores keep their order
pub fn rank_by_score(items: &mut [&ScoredItem]) {
    items.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Stable sort by total orders, descending
pub fn rank_by_orders(items: &mut [&ScoredItem]) {
    items.sort_by(|a, b| b.record.total_order.cmp(&a.record.total_order));
}

/// The `limit` best-scoring items
pub fn top_by_score<'a>(mut items: Vec<&'a ScoredItem>, limit: usize) -> Vec<&'a ScoredItem> {
    rank_by_score(&mut items);
    items.truncate(limit);
    items
}

/// The `limit` most-ordered items
pub fn top_by_orders<'a>(mut items: Vec<&'a ScoredItem>, limit: usize) -> Vec<&'a ScoredItem> {
    rank_by_orders(&mut items);
    items.truncate(limit);
    items
}

/// Items of one vendor within a result set
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VendorGroup<'a> {
    pub vendor_name: &'a str,
    pub items: Vec<&'a ScoredItem>,
}

/// Group items by vendor in first-appearance order, keeping each
/// vendor's `per_vendor` best-scoring items
pub fn group_by_vendor<'a>(items: &[&'a ScoredItem], per_vendor: usize) -> Vec<VendorGroup<'a>> {
    let mut groups: Vec<VendorGroup<'a>> = Vec::new();
    for &item in items {
        match groups.iter_mut().find(|g| g.vendor_name == item.vendor_name()) {
            Some(group) => group.items.push(item),
            None => groups.push(VendorGroup {
                vendor_name: item.vendor_name(),
                items: vec![item],
            }),
        }
    }
    for group in &mut groups {
        rank_by_score(&mut group.items);
        group.items.truncate(per_vendor);
    }
    groups
}
