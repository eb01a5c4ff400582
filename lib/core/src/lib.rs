//! # Foodans Core
//!
//! Core library for the Foodans recommendation engine.
//!
//! This crate provides the catalog and the ranking primitives:
//!
//! - [`Catalog`] - The immutable, scored vendor/item table
//! - [`ScoredItem`] - A catalog row with its composite score
//! - [`Query`] - Compound area/category/diet/price/rating filter
//! - [`find`] - Filter and rank the catalog for a query
//!
//! ## Example
//!
//! ```rust
//! use foodans_core::{Catalog, Query, DietPreference, PriceBand, find};
//!
//! let csv = "Area,Type,Food_Type,Name,Item_Name,Price,Avg_Rating,Total_Order\n\
//!            Anna Nagar,Tiffin,Veg,Amma Mess,Idli,30,4.5,50\n";
//! let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
//!
//! let query = Query::new()
//!     .with_category("Tiffin")
//!     .with_diet(DietPreference::Veg)
//!     .with_price(PriceBand::UpTo50.range());
//! let results = find(&catalog, &query);
//! assert_eq!(results[0].item_name(), "Idli");
//! ```

pub mod catalog;
pub mod error;
pub mod filter;
pub mod item;
pub mod query;
pub mod score;

pub use catalog::{Catalog, LoadStats};
pub use error::{Error, Result};
pub use filter::{
    filter_items, find, group_by_vendor, rank_by_orders, rank_by_score, top_by_orders,
    top_by_score, Filter, VendorGroup,
};
pub use item::{FoodType, ItemRecord, ScoredItem};
pub use query::{DietPreference, PriceBand, Query, RatingBand, ValueRange};
