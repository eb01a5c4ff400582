use crate::index::{Neighbors, SimilarityIndex};
use ahash::AHashMap;
use foodans_core::{Result, ScoredItem};
use parking_lot::RwLock;

/// Something that can answer "which items are closest to this one"
pub trait NeighborSource {
    fn neighbors(&self, anchor: &ScoredItem) -> Result<Neighbors>;
}

impl NeighborSource for SimilarityIndex {
    fn neighbors(&self, anchor: &ScoredItem) -> Result<Neighbors> {
        self.query(anchor)
    }
}

/// Memoized neighbor lists keyed by anchor catalog position
///
/// Positions and the index are both immutable, so entries never go stale.
#[derive(Debug, Default)]
pub struct NeighborCache {
    entries: RwLock<AHashMap<usize, Neighbors>>,
}

impl NeighborCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn get_or_try_insert<F>(&self, position: usize, compute: F) -> Result<Neighbors>
    where
        F: FnOnce() -> Result<Neighbors>,
    {
        if let Some(hit) = self.entries.read().get(&position) {
            return Ok(hit.clone());
        }
        let neighbors = compute()?;
        self.entries.write().insert(position, neighbors.clone());
        Ok(neighbors)
    }
}

/// An index fronted by a neighbor cache
pub struct CachedIndex<'a> {
    index: &'a SimilarityIndex,
    cache: &'a NeighborCache,
}

impl<'a> CachedIndex<'a> {
    pub fn new(index: &'a SimilarityIndex, cache: &'a NeighborCache) -> Self {
        Self { index, cache }
    }
}

impl NeighborSource for CachedIndex<'_> {
    fn neighbors(&self, anchor: &ScoredItem) -> Result<Neighbors> {
        self.cache
            .get_or_try_insert(anchor.position, || self.index.query(anchor))
    }
}
