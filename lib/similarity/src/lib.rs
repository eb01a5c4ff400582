//! # Foodans Similarity
//!
//! Nearest-neighbor lookups over catalog items.
//!
//! Every item is placed in a small raw feature space
//! (`price`, `avg_rating`, diet code) and the index answers exact
//! k-nearest-neighbor queries. On top of that sits the fallback used when
//! a category search matches nothing: anchor on the first item of the
//! category and suggest its neighbors.
//!
//! ## Example
//!
//! ```rust
//! use foodans_core::{Catalog, DietPreference};
//! use foodans_similarity::{SimilarityIndex, similar_in_category};
//!
//! let csv = "Area,Type,Food_Type,Name,Item_Name,Price,Avg_Rating,Total_Order\n\
//!            Anna Nagar,Tiffin,Veg,Amma Mess,Idli,30,4.5,50\n\
//!            Anna Nagar,Tiffin,Veg,Amma Mess,Pongal,35,4.3,20\n";
//! let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
//! let index = SimilarityIndex::build(&catalog);
//!
//! let similar = similar_in_category(&catalog, &index, "Tiffin", DietPreference::Veg, 3).unwrap();
//! assert_eq!(similar.len(), 2);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Catalog   │────>│  Features   │────>│    Index    │
//! │   (items)   │     │ (item→f64³) │     │   (exact)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        │
//!       │              ┌─────────────┐           │
//!       └─────────────>│  Fallback   │<──────────┘
//!                      │  (anchor)   │
//!                      └─────────────┘
//! ```

pub mod cache;
pub mod distance;
pub mod fallback;
pub mod index;

pub use cache::{CachedIndex, NeighborCache, NeighborSource};
pub use distance::FeatureVector;
pub use fallback::{
    find_anchor, similar_in_category, similar_to, CATEGORY_SEARCH_SUGGESTIONS,
    VENDOR_BROWSE_SUGGESTIONS,
};
pub use index::{resolve, Neighbor, Neighbors, SimilarityIndex, DEFAULT_NEIGHBORS};
