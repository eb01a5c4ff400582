//! # Foodans
//!
//! A food recommendation engine over an in-memory vendor/item catalog.
//!
//! Every catalog row is scored once at load time from its rating and its
//! share of the most-ordered item. On top of that, Foodans answers:
//!
//! - **Search**: filter by area, category, diet, price and rating, best score first
//! - **Similar items**: exact k-nearest-neighbors over price, rating and diet
//! - **What's next**: suggestions from the categories that usually follow the current one
//! - **Vendor views**: top vendors per area, vendor profiles, top sellers
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! foodans --catalog ./data/catalog.csv --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use foodans::prelude::*;
//!
//! let csv = "Area,Type,Food_Type,Name,Item_Name,Price,Avg_Rating,Total_Order\n\
//!            Anna Nagar,Tiffin,Veg,Amma Mess,Idli,30,4.5,50\n\
//!            Simmakkal,Tiffin,Non-Veg,Amma Mess,Kari Dosa,90,4.6,80\n";
//! let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
//! let engine = Engine::new(catalog, EngineConfig::default());
//!
//! let query = Query::new().with_category("Tiffin").with_diet(DietPreference::Veg);
//! let results = engine.find(&query);
//! assert_eq!(results[0].item_name(), "Idli");
//! ```
//!
//! ## Crate Structure
//!
//! - `foodans-core` - Records, catalog loading, scoring, query filters
//! - `foodans-similarity` - Feature vectors, exact kNN index, anchor fallback
//! - `foodans-recommend` - Transition table, planner, vendor views, [`Engine`]
//! - `foodans-api` - JSON HTTP API

// Re-export core types
pub use foodans_core::{
    find, Catalog, DietPreference, Error, FoodType, ItemRecord, PriceBand, Query, RatingBand,
    Result, ScoredItem, ValueRange,
};

// Re-export similarity
pub use foodans_similarity::{FeatureVector, SimilarityIndex, DEFAULT_NEIGHBORS};

// Re-export recommendation
pub use foodans_recommend::{
    Engine, EngineConfig, NextPlan, SearchOutcome, TransitionTable, WhatNext,
};

// Re-export API
pub use foodans_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, DietPreference, Engine, EngineConfig, Error, FoodType, PriceBand, Query,
        RatingBand, Result, ScoredItem, SearchOutcome, ValueRange, WhatNext,
    };
}
