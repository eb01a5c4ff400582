//! Per-vendor aggregation

use foodans_core::{rank_by_score, top_by_orders, Catalog, DietPreference, ScoredItem};
use serde::Serialize;

/// Summary statistics for one vendor's items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorSummary<'a> {
    pub vendor_name: &'a str,
    pub avg_rating: f64,
    pub total_orders: u64,
    /// Most-ordered items, ties in catalog order
    pub top_items: Vec<&'a ScoredItem>,
}

/// Summarize a vendor's items; `None` when there are none
///
/// The vendor name is taken from the first item.
pub fn summarize<'a>(items: &[&'a ScoredItem], top_n: usize) -> Option<VendorSummary<'a>> {
    let first = items.first()?;
    let rating_sum: f64 = items.iter().map(|i| i.record.avg_rating).sum();
    let total_orders = items.iter().map(|i| i.record.total_order).sum();

    Some(VendorSummary {
        vendor_name: first.vendor_name(),
        avg_rating: rating_sum / items.len() as f64,
        total_orders,
        top_items: top_by_orders(items.to_vec(), top_n),
    })
}

/// A vendor ranked by the mean score of its items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedVendor<'a> {
    pub vendor_name: &'a str,
    pub mean_score: f64,
    pub items: Vec<&'a ScoredItem>,
}

/// Best vendors in an area by mean item score
///
/// Each vendor carries its `items_per_vendor` best-scoring items.
pub fn top_vendors<'a>(
    catalog: &'a Catalog,
    area: &str,
    diet: DietPreference,
    vendor_limit: usize,
    items_per_vendor: usize,
) -> Vec<RankedVendor<'a>> {
    let mut ranked: Vec<RankedVendor<'a>> = group_vendors(area_items(catalog, area, diet))
        .into_iter()
        .map(|(vendor_name, mut items)| {
            let mean_score = items.iter().map(|i| i.score).sum::<f64>() / items.len() as f64;
            rank_by_score(&mut items);
            items.truncate(items_per_vendor);
            RankedVendor {
                vendor_name,
                mean_score,
                items,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.mean_score.total_cmp(&a.mean_score));
    ranked.truncate(vendor_limit);
    ranked
}

/// Every vendor in an area plus the area's most-ordered items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaBoard<'a> {
    pub area: String,
    pub vendors: Vec<VendorSummary<'a>>,
    pub favourites: Vec<&'a ScoredItem>,
}

pub fn area_board<'a>(
    catalog: &'a Catalog,
    area: &str,
    diet: DietPreference,
    top_n: usize,
    favourites: usize,
) -> AreaBoard<'a> {
    let items = area_items(catalog, area, diet);
    let vendors = group_vendors(items.clone())
        .into_iter()
        .filter_map(|(_, vendor_items)| summarize(&vendor_items, top_n))
        .collect();

    AreaBoard {
        area: area.to_string(),
        vendors,
        favourites: top_by_orders(items, favourites),
    }
}

/// Deep-dive view of one vendor across the whole catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorProfile<'a> {
    pub vendor_name: &'a str,
    pub areas: Vec<&'a str>,
    pub categories: Vec<&'a str>,
    pub avg_rating: f64,
    pub total_orders: u64,
    /// Category the top items were restricted to, if any
    pub focus_category: Option<&'a str>,
    pub top_items: Vec<&'a ScoredItem>,
}

/// Profile a vendor; top items are restricted to `category` when the
/// vendor sells it. No diet filter applies.
pub fn vendor_profile<'a>(
    catalog: &'a Catalog,
    vendor: &str,
    category: Option<&str>,
    top_n: usize,
) -> Option<VendorProfile<'a>> {
    let items = catalog.by_vendor(vendor);
    let summary = summarize(&items, 0)?;

    let focus_category = category.and_then(|c| {
        items
            .iter()
            .find(|i| i.category() == c)
            .map(|i| i.category())
    });
    let shown: Vec<&ScoredItem> = match focus_category {
        Some(c) => items.iter().copied().filter(|i| i.category() == c).collect(),
        None => items.clone(),
    };

    Some(VendorProfile {
        vendor_name: summary.vendor_name,
        areas: distinct(items.iter().map(|i| i.area())),
        categories: distinct(items.iter().map(|i| i.category())),
        avg_rating: summary.avg_rating,
        total_orders: summary.total_orders,
        focus_category,
        top_items: top_by_orders(shown, top_n),
    })
}

/// A vendor's most-ordered item in a category
pub fn top_seller<'a>(
    catalog: &'a Catalog,
    vendor: &str,
    category: &str,
    diet: DietPreference,
) -> Option<&'a ScoredItem> {
    let items = catalog
        .by_vendor(vendor)
        .into_iter()
        .filter(|i| i.category() == category && diet.allows(i.food_type()))
        .collect();
    top_by_orders(items, 1).into_iter().next()
}

/// Aggregates for every dish name a vendor sells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishStat<'a> {
    pub item_name: &'a str,
    pub total_orders: u64,
    pub avg_rating: f64,
    pub avg_price: f64,
}

/// Per-dish totals and means for a vendor, in first-appearance order
pub fn dish_breakdown<'a>(
    catalog: &'a Catalog,
    vendor: &str,
    diet: DietPreference,
) -> Vec<DishStat<'a>> {
    let mut dishes: Vec<(&'a str, Vec<&'a ScoredItem>)> = Vec::new();
    for item in catalog.by_vendor(vendor) {
        if !diet.allows(item.food_type()) {
            continue;
        }
        match dishes.iter_mut().find(|(name, _)| *name == item.item_name()) {
            Some((_, group)) => group.push(item),
            None => dishes.push((item.item_name(), vec![item])),
        }
    }

    dishes
        .into_iter()
        .map(|(item_name, group)| {
            let n = group.len() as f64;
            DishStat {
                item_name,
                total_orders: group.iter().map(|i| i.record.total_order).sum(),
                avg_rating: group.iter().map(|i| i.record.avg_rating).sum::<f64>() / n,
                avg_price: group.iter().map(|i| i.record.price).sum::<f64>() / n,
            }
        })
        .collect()
}

fn area_items<'a>(catalog: &'a Catalog, area: &str, diet: DietPreference) -> Vec<&'a ScoredItem> {
    catalog
        .by_area(area)
        .into_iter()
        .filter(|i| diet.allows(i.food_type()))
        .collect()
}

// Vendors in first-appearance order with their items in catalog order.
fn group_vendors<'a>(items: Vec<&'a ScoredItem>) -> Vec<(&'a str, Vec<&'a ScoredItem>)> {
    let mut groups: Vec<(&'a str, Vec<&'a ScoredItem>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(name, _)| *name == item.vendor_name()) {
            Some((_, group)) => group.push(item),
            None => groups.push((item.vendor_name(), vec![item])),
        }
    }
    groups
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&'a str> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
