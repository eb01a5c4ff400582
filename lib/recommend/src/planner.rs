//! "What's next" planner
//!
//! Walks the transition table for the current category and collects the
//! best items of each next category, preferring the user's area and
//! falling back to the whole catalog.

use crate::transitions::TransitionTable;
use foodans_core::{find, Catalog, DietPreference, Query, ScoredItem};
use serde::{Deserialize, Serialize};

/// Limits applied while planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    /// Items taken from each next category
    pub per_category: usize,
    /// Items returned after de-duplication
    pub total: usize,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            per_category: 3,
            total: 3,
        }
    }
}

/// Result of planning the next course
#[derive(Debug, Clone, PartialEq)]
pub enum NextPlan<'a> {
    /// Ranked suggestions, unique by item name
    Matches(Vec<&'a ScoredItem>),
    /// The category has transitions but none of them produced an item;
    /// callers should fall back to similarity search on the current category
    NoDirectMatches,
    /// The category is not in the transition table
    NoTransitions,
}

/// Plan suggestions to follow `category`
pub fn plan_next<'a>(
    catalog: &'a Catalog,
    table: &TransitionTable,
    category: &str,
    area: &str,
    diet: DietPreference,
    limits: PlanLimits,
) -> NextPlan<'a> {
    let next_categories = table.next_categories(category);
    if next_categories.is_empty() {
        return NextPlan::NoTransitions;
    }

    let mut candidates: Vec<&ScoredItem> = Vec::new();
    for next in next_categories {
        let scoped = Query::new().with_category(next.as_str()).with_diet(diet);

        let mut picked = find(catalog, &scoped.clone().with_area(area));
        if picked.is_empty() {
            picked = find(catalog, &scoped);
            if !picked.is_empty() {
                tracing::debug!("No {:?} in {:?}, suggesting from all areas", next, area);
            }
        }
        picked.truncate(limits.per_category);
        candidates.extend(picked);
    }

    if candidates.is_empty() {
        return NextPlan::NoDirectMatches;
    }

    NextPlan::Matches(dedup_by_item_name(candidates, limits.total))
}

/// Keep the first occurrence of every item name, up to `limit` items
pub fn dedup_by_item_name<'a>(items: Vec<&'a ScoredItem>, limit: usize) -> Vec<&'a ScoredItem> {
    let mut seen = ahash::AHashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.item_name()))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodans_core::{FoodType, ItemRecord};

    fn record(
        vendor: &str,
        item: &str,
        area: &str,
        category: &str,
        food: FoodType,
        rating: f64,
    ) -> ItemRecord {
        ItemRecord {
            vendor_name: vendor.to_string(),
            item_name: item.to_string(),
            area: area.to_string(),
            category: category.to_string(),
            food_type: food,
            price: 50.0,
            avg_rating: rating,
            total_order: 10,
        }
    }

    fn plan_from<'a>(catalog: &'a Catalog, category: &str, diet: DietPreference) -> NextPlan<'a> {
        let table = TransitionTable::standard();
        plan_next(catalog, &table, category, "Anna Nagar", diet, PlanLimits::default())
    }

    fn names<'a>(plan: &NextPlan<'a>) -> Vec<&'a str> {
        match plan {
            NextPlan::Matches(items) => items.iter().map(|i| i.item_name()).collect(),
            other => panic!("expected matches, got {:?}", other),
        }
    }

    #[test]
    fn test_prefers_area_then_catalog() {
        let catalog = Catalog::from_records(vec![
            record("Chai Point", "Masala Tea", "Anna Nagar", "Tea", FoodType::Veg, 4.0),
            record("Tea Stall", "Ginger Tea", "Simmakkal", "Tea", FoodType::Veg, 4.9),
            record("Burger Hub", "Veg Burger", "Simmakkal", "Fast Food", FoodType::Veg, 4.2),
        ]);

        // Tiffin -> Tea (scoped hit), Lunch (absent), Fast Food (falls back to Simmakkal)
        let plan = plan_from(&catalog, "Tiffin", DietPreference::Both);
        assert_eq!(names(&plan), vec!["Masala Tea", "Veg Burger"]);
    }

    #[test]
    fn test_dedup_and_limit() {
        let catalog = Catalog::from_records(vec![
            record("A", "Masala Tea", "Anna Nagar", "Tea", FoodType::Veg, 4.9),
            record("B", "Masala Tea", "Anna Nagar", "Tea", FoodType::Veg, 4.8),
            record("C", "Lemon Tea", "Anna Nagar", "Tea", FoodType::Veg, 4.1),
            record("D", "Cold Coffee", "Anna Nagar", "Café", FoodType::Veg, 4.5),
            record("E", "Brownie", "Anna Nagar", "Café", FoodType::Veg, 4.4),
        ]);

        let plan = plan_from(&catalog, "Fast Food", DietPreference::Both);
        let items = names(&plan);
        assert_eq!(items, vec!["Masala Tea", "Lemon Tea", "Cold Coffee"]);
        match plan {
            NextPlan::Matches(items) => assert_eq!(items[0].vendor_name(), "A"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_diet_filter_applies_before_top_n() {
        let catalog = Catalog::from_records(vec![
            record("A", "Chicken Roll", "Anna Nagar", "Fast Food", FoodType::NonVeg, 4.9),
            record("B", "Egg Puff", "Anna Nagar", "Fast Food", FoodType::NonVeg, 4.8),
            record("C", "Mutton Burger", "Anna Nagar", "Fast Food", FoodType::NonVeg, 4.7),
            record("D", "Veg Puff", "Anna Nagar", "Fast Food", FoodType::Veg, 3.5),
        ]);

        let plan = plan_from(&catalog, "Tea", DietPreference::Veg);
        assert_eq!(names(&plan), vec!["Veg Puff"]);
    }

    #[test]
    fn test_no_direct_matches() {
        let idli = record("A", "Idli", "Anna Nagar", "Tiffin", FoodType::Veg, 4.0);
        let catalog = Catalog::from_records(vec![idli]);
        let plan = plan_from(&catalog, "Fast Food", DietPreference::Both);
        assert_eq!(plan, NextPlan::NoDirectMatches);
    }

    #[test]
    fn test_unmapped_category() {
        let idli = record("A", "Idli", "Anna Nagar", "Tiffin", FoodType::Veg, 4.0);
        let catalog = Catalog::from_records(vec![idli]);
        let plan = plan_from(&catalog, "Dessert", DietPreference::Both);
        assert_eq!(plan, NextPlan::NoTransitions);
    }
}
