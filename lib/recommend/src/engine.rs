use crate::planner::{plan_next, NextPlan, PlanLimits};
use crate::transitions::TransitionTable;
use crate::vendor::{
    area_board, dish_breakdown, top_seller, top_vendors, vendor_profile, AreaBoard, DishStat,
    RankedVendor, VendorProfile,
};
use foodans_core::{
    find, group_by_vendor, Catalog, DietPreference, Query, Result, ScoredItem, VendorGroup,
};
use foodans_similarity::{
    similar_in_category, similar_to, CachedIndex, NeighborCache, SimilarityIndex,
    CATEGORY_SEARCH_SUGGESTIONS, DEFAULT_NEIGHBORS, VENDOR_BROWSE_SUGGESTIONS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for an engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Neighbors returned per similarity query (k)
    pub neighbors: usize,
    /// Memoize neighbor lists per anchor item
    pub neighbor_cache: bool,
    pub plan: PlanLimits,
    /// Items kept per vendor when grouping search results
    pub items_per_vendor: usize,
    /// Suggestions drawn when a category search comes back empty
    pub empty_search_suggestions: usize,
    /// Suggestions drawn when a vendor has nothing in the browsed category
    pub vendor_browse_suggestions: usize,
    /// Suggestions drawn next to a search's top result, and after an empty plan
    pub similar_suggestions: usize,
    pub top_vendors: usize,
    pub top_vendor_items: usize,
    pub area_summary_items: usize,
    pub area_favourites: usize,
    pub vendor_profile_items: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neighbors: DEFAULT_NEIGHBORS,
            neighbor_cache: false,
            plan: PlanLimits::default(),
            items_per_vendor: 4,
            empty_search_suggestions: CATEGORY_SEARCH_SUGGESTIONS,
            vendor_browse_suggestions: VENDOR_BROWSE_SUGGESTIONS,
            similar_suggestions: CATEGORY_SEARCH_SUGGESTIONS,
            top_vendors: 5,
            top_vendor_items: 3,
            area_summary_items: 5,
            area_favourites: 5,
            vendor_profile_items: 7,
        }
    }
}

/// Results of a successful search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Found<'a> {
    /// All matches, best first
    pub results: Vec<&'a ScoredItem>,
    pub by_vendor: Vec<VendorGroup<'a>>,
    /// Neighbors of the top result in the same category
    pub similar: Vec<&'a ScoredItem>,
    /// Most-ordered item of the top result's vendor in the category
    pub top_seller: Option<&'a ScoredItem>,
}

/// Outcome of [`Engine::search`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SearchOutcome<'a> {
    Found(Found<'a>),
    /// Nothing matched; similar items from the requested category instead
    Similar(Vec<&'a ScoredItem>),
    /// Nothing matched and the query names no category to relax on
    Empty,
}

/// Outcome of [`Engine::what_next`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum WhatNext<'a> {
    Direct(Vec<&'a ScoredItem>),
    /// No next-category item was found; neighbors in the current category
    Similar(Vec<&'a ScoredItem>),
    /// The current category has no configured transitions
    NoTransitions,
}

/// Outcome of [`Engine::browse_vendor`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum VendorBrowse<'a> {
    /// The vendor's most-ordered item in the category
    TopSeller(&'a ScoredItem),
    /// The vendor has nothing there; similar items of the category instead
    Similar(Vec<&'a ScoredItem>),
}

/// The immutable recommendation context
///
/// Owns the catalog, its similarity index and the transition table. Built
/// once at startup and shared read-only; every operation borrows from it.
pub struct Engine {
    catalog: Catalog,
    index: SimilarityIndex,
    cache: Option<NeighborCache>,
    transitions: TransitionTable,
    config: EngineConfig,
}

impl Engine {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let index = SimilarityIndex::with_neighbors(&catalog, config.neighbors);
        let cache = config.neighbor_cache.then(NeighborCache::new);
        tracing::info!(
            "Engine ready: {} items, {} areas, {} categories, k={}",
            catalog.len(),
            catalog.areas().len(),
            catalog.categories().len(),
            config.neighbors
        );
        Self {
            catalog,
            index,
            cache,
            transitions: TransitionTable::standard(),
            config,
        }
    }

    /// Load the catalog at `path` and build the engine
    pub fn load<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self> {
        Ok(Self::new(Catalog::load(path)?, config))
    }

    #[must_use]
    pub fn with_transitions(mut self, transitions: TransitionTable) -> Self {
        self.transitions = transitions;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn cached_neighbor_lists(&self) -> usize {
        self.cache.as_ref().map_or(0, NeighborCache::len)
    }

    /// Filter and rank; empty when nothing matches
    pub fn find(&self, query: &Query) -> Vec<&ScoredItem> {
        find(&self.catalog, query)
    }

    /// Find with the full browsing treatment
    ///
    /// A hit is grouped by vendor and extended with neighbors of the top
    /// result. A miss on a category query falls back to similar items of
    /// that category, which fails with `CategoryNotFound` when the category
    /// has no item for the diet.
    pub fn search(&self, query: &Query) -> Result<SearchOutcome<'_>> {
        let results = self.find(query);

        let Some(top) = results.first().copied() else {
            return match &query.category {
                Some(category) => {
                    tracing::debug!(
                        "Search for {:?} matched nothing, relaxing by similarity",
                        category
                    );
                    let similar = self.similar_in_category(
                        category,
                        query.diet,
                        self.config.empty_search_suggestions,
                    )?;
                    Ok(SearchOutcome::Similar(similar))
                }
                None => Ok(SearchOutcome::Empty),
            };
        };

        let category = query.category.as_deref().unwrap_or(top.category());
        let similar = self.similar_to(top, category, query.diet, self.config.similar_suggestions)?;
        let top_seller = top_seller(&self.catalog, top.vendor_name(), category, query.diet);
        let by_vendor = group_by_vendor(&results, self.config.items_per_vendor);

        Ok(SearchOutcome::Found(Found {
            results,
            by_vendor,
            similar,
            top_seller,
        }))
    }

    /// Similar items for a category, anchored on its first item
    pub fn similar_in_category(
        &self,
        category: &str,
        diet: DietPreference,
        take: usize,
    ) -> Result<Vec<&ScoredItem>> {
        match &self.cache {
            Some(cache) => similar_in_category(
                &self.catalog,
                &CachedIndex::new(&self.index, cache),
                category,
                diet,
                take,
            ),
            None => similar_in_category(&self.catalog, &self.index, category, diet, take),
        }
    }

    /// Items near `anchor` within `category`
    pub fn similar_to(
        &self,
        anchor: &ScoredItem,
        category: &str,
        diet: DietPreference,
        take: usize,
    ) -> Result<Vec<&ScoredItem>> {
        match &self.cache {
            Some(cache) => similar_to(
                &self.catalog,
                &CachedIndex::new(&self.index, cache),
                anchor,
                category,
                diet,
                take,
            ),
            None => similar_to(&self.catalog, &self.index, anchor, category, diet, take),
        }
    }

    pub fn next_categories(&self, category: &str) -> &[String] {
        self.transitions.next_categories(category)
    }

    /// Raw planner output without the similarity fallback
    pub fn plan_next(&self, category: &str, area: &str, diet: DietPreference) -> NextPlan<'_> {
        plan_next(&self.catalog, &self.transitions, category, area, diet, self.config.plan)
    }

    /// Suggestions to follow `category`, falling back to similar items of
    /// `category` itself when no next-category item exists
    pub fn what_next(
        &self,
        category: &str,
        area: &str,
        diet: DietPreference,
    ) -> Result<WhatNext<'_>> {
        match self.plan_next(category, area, diet) {
            NextPlan::Matches(items) => Ok(WhatNext::Direct(items)),
            NextPlan::NoTransitions => Ok(WhatNext::NoTransitions),
            NextPlan::NoDirectMatches => {
                tracing::debug!(
                    "No direct matches after {:?} in {:?}, exploring nearby",
                    category,
                    area
                );
                let similar =
                    self.similar_in_category(category, diet, self.config.similar_suggestions)?;
                Ok(WhatNext::Similar(similar))
            }
        }
    }

    pub fn top_vendors(&self, area: &str, diet: DietPreference) -> Vec<RankedVendor<'_>> {
        top_vendors(
            &self.catalog,
            area,
            diet,
            self.config.top_vendors,
            self.config.top_vendor_items,
        )
    }

    pub fn area_board(&self, area: &str, diet: DietPreference) -> AreaBoard<'_> {
        area_board(
            &self.catalog,
            area,
            diet,
            self.config.area_summary_items,
            self.config.area_favourites,
        )
    }

    pub fn vendor_profile(
        &self,
        vendor: &str,
        category: Option<&str>,
    ) -> Option<VendorProfile<'_>> {
        vendor_profile(&self.catalog, vendor, category, self.config.vendor_profile_items)
    }

    pub fn top_seller(
        &self,
        vendor: &str,
        category: &str,
        diet: DietPreference,
    ) -> Option<&ScoredItem> {
        top_seller(&self.catalog, vendor, category, diet)
    }

    /// A vendor's top seller in `category`, or similar items of that
    /// category from anywhere when the vendor sells none for the diet
    pub fn browse_vendor(
        &self,
        vendor: &str,
        category: &str,
        diet: DietPreference,
    ) -> Result<VendorBrowse<'_>> {
        if let Some(item) = self.top_seller(vendor, category, diet) {
            return Ok(VendorBrowse::TopSeller(item));
        }
        tracing::debug!("{:?} has no {:?}, suggesting similar items", vendor, category);
        let similar =
            self.similar_in_category(category, diet, self.config.vendor_browse_suggestions)?;
        Ok(VendorBrowse::Similar(similar))
    }

    pub fn dish_breakdown(&self, vendor: &str, diet: DietPreference) -> Vec<DishStat<'_>> {
        dish_breakdown(&self.catalog, vendor, diet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodans_core::{Error, FoodType, ItemRecord, ValueRange};

    type Row<'a> = (&'a str, &'a str, &'a str, &'a str, FoodType, f64, f64, u64);

    fn record((vendor, item, area, category, food, price, rating, orders): Row) -> ItemRecord {
        ItemRecord {
            vendor_name: vendor.to_string(),
            item_name: item.to_string(),
            area: area.to_string(),
            category: category.to_string(),
            food_type: food,
            price,
            avg_rating: rating,
            total_order: orders,
        }
    }

    fn engine(config: EngineConfig) -> Engine {
        let rows: [Row; 5] = [
            ("Chai Point", "Masala Tea", "Anna Nagar", "Tea", FoodType::Veg, 15.0, 4.1, 120),
            ("Murugan Idli", "Podi Idli", "Simmakkal", "Tiffin", FoodType::Veg, 45.0, 4.4, 90),
            ("Amma Mess", "Kari Dosa", "Simmakkal", "Tiffin", FoodType::NonVeg, 90.0, 4.6, 60),
            ("Murugan Idli", "Pongal", "Simmakkal", "Tiffin", FoodType::Veg, 50.0, 4.0, 40),
            ("Tea Stall", "Ginger Tea", "Simmakkal", "Tea", FoodType::Veg, 20.0, 3.9, 70),
        ];
        let catalog = Catalog::from_records(rows.into_iter().map(record).collect());
        Engine::new(catalog, config)
    }

    #[test]
    fn test_search_found() {
        let engine = engine(EngineConfig::default());
        let query = Query::new().with_area("Simmakkal").with_category("Tiffin");

        let SearchOutcome::Found(found) = engine.search(&query).unwrap() else {
            panic!("expected results");
        };
        assert_eq!(found.results.len(), 3);
        assert_eq!(found.by_vendor.len(), 2);
        assert!(found.similar.iter().all(|i| i.category() == "Tiffin"));
        assert_eq!(found.top_seller.map(|i| i.item_name()), Some("Kari Dosa"));
    }

    #[test]
    fn test_search_relaxes_to_similar() {
        let engine = engine(EngineConfig::default());
        let query = Query::new()
            .with_area("Anna Nagar")
            .with_category("Tiffin")
            .with_diet(DietPreference::Veg)
            .with_price(ValueRange::new(0.0, 50.0));

        // Anchor Podi Idli (45): nearest are Podi Idli, Pongal (50), Ginger Tea (20)
        let outcome = engine.search(&query).unwrap();
        let SearchOutcome::Similar(similar) = outcome else {
            panic!("expected similarity fallback");
        };
        let names: Vec<&str> = similar.iter().map(|i| i.item_name()).collect();
        assert_eq!(names, vec!["Podi Idli", "Pongal"]);
    }

    #[test]
    fn test_empty_category_search_suggests_three() {
        let rows: [Row; 5] = [
            ("Chai Point", "Masala Tea", "Anna Nagar", "Tea", FoodType::Veg, 15.0, 4.1, 120),
            ("Amma Mess", "Idli", "Simmakkal", "Tiffin", FoodType::Veg, 30.0, 4.5, 50),
            ("Amma Mess", "Pongal", "Simmakkal", "Tiffin", FoodType::Veg, 31.0, 4.0, 30),
            ("Amma Mess", "Upma", "Simmakkal", "Tiffin", FoodType::Veg, 32.0, 3.9, 20),
            ("Amma Mess", "Vada", "Simmakkal", "Tiffin", FoodType::Veg, 33.0, 4.2, 40),
        ];
        let catalog = Catalog::from_records(rows.into_iter().map(record).collect());
        let engine = Engine::new(catalog, EngineConfig::default());

        let query = Query::new().with_area("Anna Nagar").with_category("Tiffin");
        let SearchOutcome::Similar(similar) = engine.search(&query).unwrap() else {
            panic!("expected similarity fallback");
        };
        let names: Vec<&str> = similar.iter().map(|i| i.item_name()).collect();
        assert_eq!(names, vec!["Idli", "Pongal", "Upma"]);
    }

    #[test]
    fn test_browse_vendor() {
        let engine = engine(EngineConfig::default());

        let browse = engine.browse_vendor("Murugan Idli", "Tiffin", DietPreference::Veg).unwrap();
        assert_eq!(browse, VendorBrowse::TopSeller(engine.catalog().get(1).unwrap()));

        // Murugan Idli has no NonVeg Tiffin: anchor Kari Dosa, two neighbors taken
        let browse = engine.browse_vendor("Murugan Idli", "Tiffin", DietPreference::NonVeg);
        let VendorBrowse::Similar(similar) = browse.unwrap() else {
            panic!("expected similar items");
        };
        let names: Vec<&str> = similar.iter().map(|i| i.item_name()).collect();
        assert_eq!(names, vec!["Kari Dosa"]);

        let err = engine.browse_vendor("Chai Point", "Lunch", DietPreference::Both).unwrap_err();
        assert!(matches!(err, Error::CategoryNotFound(_)));
    }

    #[test]
    fn test_search_unknown_category() {
        let engine = engine(EngineConfig::default());
        let err = engine.search(&Query::new().with_category("Biryani")).unwrap_err();
        assert!(matches!(err, Error::CategoryNotFound(_)));
    }

    #[test]
    fn test_search_without_category_is_empty() {
        let engine = engine(EngineConfig::default());
        let outcome = engine.search(&Query::new().with_area("Nowhere")).unwrap();
        assert_eq!(outcome, SearchOutcome::Empty);
    }

    #[test]
    fn test_what_next_direct() {
        let engine = engine(EngineConfig::default());
        let outcome = engine.what_next("Tiffin", "Anna Nagar", DietPreference::Both).unwrap();
        let WhatNext::Direct(items) = outcome else {
            panic!("expected direct suggestions");
        };
        assert_eq!(items[0].item_name(), "Masala Tea");
        assert!(items.len() <= 3);
    }

    #[test]
    fn test_what_next_falls_back_to_similar() {
        let engine = engine(EngineConfig::default());
        // Tiffin -> Tea, Lunch, Fast Food: none has a NonVeg item
        let outcome = engine.what_next("Tiffin", "Simmakkal", DietPreference::NonVeg).unwrap();
        let WhatNext::Similar(items) = outcome else {
            panic!("expected similarity fallback");
        };
        let names: Vec<&str> = items.iter().map(|i| i.item_name()).collect();
        assert_eq!(names, vec!["Kari Dosa"]);
    }

    #[test]
    fn test_what_next_fallback_without_anchor() {
        let engine = engine(EngineConfig::default());
        // Lunch -> Café, Tea, Fast Food: no NonVeg items, and no Lunch to anchor on
        let outcome = engine.what_next("Lunch", "Simmakkal", DietPreference::NonVeg);
        assert!(matches!(outcome, Err(Error::CategoryNotFound(_))));
    }

    #[test]
    fn test_what_next_unmapped() {
        let engine = engine(EngineConfig::default());
        let outcome = engine.what_next("Dessert", "Simmakkal", DietPreference::Both).unwrap();
        assert_eq!(outcome, WhatNext::NoTransitions);
    }

    #[test]
    fn test_cache_is_transparent() {
        let plain = engine(EngineConfig::default());
        let cached = engine(EngineConfig {
            neighbor_cache: true,
            ..EngineConfig::default()
        });
        let a = plain.similar_in_category("Tiffin", DietPreference::Both, 3).unwrap();
        let b = cached.similar_in_category("Tiffin", DietPreference::Both, 3).unwrap();
        let c = cached.similar_in_category("Tiffin", DietPreference::Both, 3).unwrap();

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(cached.cached_neighbor_lists(), 1);
        assert_eq!(plain.cached_neighbor_lists(), 0);
    }

    #[test]
    fn test_outcome_serialization() {
        let engine = engine(EngineConfig::default());
        let outcome = engine.what_next("Dessert", "Simmakkal", DietPreference::Both).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "no_transitions");
    }
}
