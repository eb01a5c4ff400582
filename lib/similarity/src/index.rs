use crate::distance::FeatureVector;
use foodans_core::{Catalog, Error, Result, ScoredItem};
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use std::collections::BinaryHeap;

pub const DEFAULT_NEIGHBORS: usize = 5;

/// A neighbor of a query point, identified by catalog position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f64,
}

pub type Neighbors = SmallVec<[Neighbor; DEFAULT_NEIGHBORS]>;

/// Heap entry; max-heap on (distance, position) so the furthest
/// (and, on ties, latest) candidate sits on top for eviction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    dist: OrderedFloat<f64>,
    position: usize,
}

/// Exact k-nearest-neighbor index over every catalog item
///
/// Built once and never modified. Queries scan all features, which is
/// fine for a city-sized catalog and keeps results exact and
/// deterministic: equal distances resolve to catalog order.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    features: Vec<FeatureVector>,
    k: usize,
}

impl SimilarityIndex {
    /// Build with the default neighbor count
    pub fn build(catalog: &Catalog) -> Self {
        Self::with_neighbors(catalog, DEFAULT_NEIGHBORS)
    }

    pub fn with_neighbors(catalog: &Catalog, k: usize) -> Self {
        let features: Vec<FeatureVector> =
            catalog.items().iter().map(FeatureVector::from).collect();
        tracing::debug!("Built similarity index over {} items (k={})", features.len(), k);
        Self { features, k }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[inline]
    pub fn neighbors_per_query(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn feature(&self, position: usize) -> Option<&FeatureVector> {
        self.features.get(position)
    }

    /// The `k` nearest items to a catalog item, nearest first
    ///
    /// The item itself is part of the result.
    pub fn query(&self, item: &ScoredItem) -> Result<Neighbors> {
        self.query_vector(&FeatureVector::from(item))
    }

    /// The `k` nearest items to an arbitrary point, nearest first
    pub fn query_vector(&self, query: &FeatureVector) -> Result<Neighbors> {
        if self.features.is_empty() {
            return Err(Error::EmptyIndex);
        }
        if self.k == 0 {
            return Ok(Neighbors::new());
        }

        let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(self.k + 1);
        for (position, feature) in self.features.iter().enumerate() {
            let candidate = Candidate {
                dist: OrderedFloat(query.squared_distance(feature)),
                position,
            };
            if heap.len() < self.k {
                heap.push(candidate);
            } else if heap.peek().is_some_and(|furthest| candidate < *furthest) {
                heap.pop();
                heap.push(candidate);
            }
        }

        Ok(heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor {
                position: c.position,
                distance: c.dist.into_inner().sqrt(),
            })
            .collect())
    }

    /// Like [`query`](Self::query) but resolved to catalog items
    pub fn query_items<'a>(
        &self,
        catalog: &'a Catalog,
        item: &ScoredItem,
    ) -> Result<Vec<&'a ScoredItem>> {
        Ok(resolve(catalog, &self.query(item)?))
    }
}

/// Map neighbors back to their catalog items
pub fn resolve<'a>(catalog: &'a Catalog, neighbors: &[Neighbor]) -> Vec<&'a ScoredItem> {
    neighbors
        .iter()
        .filter_map(|n| catalog.get(n.position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodans_core::{FoodType, ItemRecord};

    fn record(item: &str, price: f64, rating: f64, food: FoodType) -> ItemRecord {
        ItemRecord {
            vendor_name: "Vendor".to_string(),
            item_name: item.to_string(),
            area: "Anna Nagar".to_string(),
            category: "Tiffin".to_string(),
            food_type: food,
            price,
            avg_rating: rating,
            total_order: 10,
        }
    }

    #[test]
    fn test_single_item_returns_itself() {
        let catalog = Catalog::from_records(vec![record("Idli", 30.0, 4.5, FoodType::Veg)]);
        let index = SimilarityIndex::build(&catalog);

        let neighbors = index.query(&catalog.items()[0]).unwrap();
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].position, 0);
        assert_eq!(neighbors[0].distance, 0.0);
    }

    #[test]
    fn test_empty_index_errors() {
        let catalog = Catalog::from_records(Vec::new());
        let index = SimilarityIndex::build(&catalog);
        let query = FeatureVector::new(10.0, 4.0, 0.0);
        assert!(matches!(index.query_vector(&query), Err(Error::EmptyIndex)));
    }

    #[test]
    fn test_nearest_first_and_includes_self() {
        let catalog = Catalog::from_records(vec![
            record("A", 10.0, 4.0, FoodType::Veg),
            record("B", 100.0, 4.0, FoodType::Veg),
            record("C", 12.0, 4.0, FoodType::Veg),
            record("D", 50.0, 4.0, FoodType::Veg),
            record("E", 11.0, 4.0, FoodType::NonVeg),
            record("F", 200.0, 4.0, FoodType::Veg),
            record("G", 9.0, 4.0, FoodType::Veg),
        ]);
        let index = SimilarityIndex::build(&catalog);

        let items = index.query_items(&catalog, &catalog.items()[0]).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.item_name()).collect();
        assert_eq!(names, vec!["A", "G", "E", "C", "D"]);
    }

    #[test]
    fn test_ties_resolve_to_catalog_order() {
        let catalog = Catalog::from_records(vec![
            record("A", 10.0, 4.0, FoodType::Veg),
            record("B", 20.0, 4.0, FoodType::Veg),
            record("C", 0.0, 4.0, FoodType::Veg),
            record("D", 20.0, 4.0, FoodType::Veg),
        ]);
        let index = SimilarityIndex::with_neighbors(&catalog, 3);

        let neighbors = index.query(&catalog.items()[0]).unwrap();
        let positions: Vec<usize> = neighbors.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_k_larger_than_catalog() {
        let catalog = Catalog::from_records(vec![
            record("A", 10.0, 4.0, FoodType::Veg),
            record("B", 20.0, 4.0, FoodType::Veg),
        ]);
        let index = SimilarityIndex::build(&catalog);
        assert_eq!(index.query(&catalog.items()[1]).unwrap().len(), 2);
    }
}
