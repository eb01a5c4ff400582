//! # Foodans Recommend
//!
//! Recommendation planning and vendor aggregation on top of the catalog
//! and similarity index, tied together by the [`Engine`] context.
//!
//! - [`Engine`] - Immutable context owning catalog, index and transitions
//! - [`TransitionTable`] - Fixed "what's next" category mapping
//! - [`plan_next`] - Next-category suggestions, area first
//! - [`summarize`] - Per-vendor rating and order statistics
//!
//! ## Example
//!
//! ```rust
//! use foodans_core::{Catalog, DietPreference};
//! use foodans_recommend::{Engine, EngineConfig, WhatNext};
//!
//! let csv = "Area,Type,Food_Type,Name,Item_Name,Price,Avg_Rating,Total_Order\n\
//!            Anna Nagar,Tiffin,Veg,Amma Mess,Idli,30,4.5,50\n\
//!            Anna Nagar,Tea,Veg,Chai Point,Masala Tea,15,4.0,100\n";
//! let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
//! let engine = Engine::new(catalog, EngineConfig::default());
//!
//! let next = engine.what_next("Tiffin", "Anna Nagar", DietPreference::Both).unwrap();
//! assert!(matches!(next, WhatNext::Direct(ref items) if items[0].item_name() == "Masala Tea"));
//! ```

pub mod engine;
pub mod planner;
pub mod transitions;
pub mod vendor;

pub use engine::{Engine, EngineConfig, Found, SearchOutcome, VendorBrowse, WhatNext};
pub use planner::{dedup_by_item_name, plan_next, NextPlan, PlanLimits};
pub use transitions::TransitionTable;
pub use vendor::{
    area_board, dish_breakdown, summarize, top_seller, top_vendors, vendor_profile, AreaBoard,
    DishStat, RankedVendor, VendorProfile, VendorSummary,
};
