//! Category transition table for "what's next" suggestions

use ahash::AHashMap;

/// Fixed mapping from a category to the categories worth suggesting after it
///
/// Lookups of unmapped categories return an empty slice.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    next: AHashMap<String, Vec<String>>,
}

impl TransitionTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let next = entries
            .into_iter()
            .map(|(from, to)| (from.into(), to.into_iter().map(Into::into).collect()))
            .collect();
        Self { next }
    }

    /// The table used by the browsing tool
    pub fn standard() -> Self {
        Self::new([
            ("Tiffin", vec!["Tea", "Lunch", "Fast Food"]),
            ("Fast Food", vec!["Tea", "Café"]),
            ("Lunch", vec!["Café", "Tea", "Fast Food"]),
            ("Tea", vec!["Fast Food", "Café", "Lunch"]),
            ("Café", vec!["Tea", "Tiffin", "Lunch"]),
        ])
    }

    pub fn next_categories(&self, category: &str) -> &[String] {
        self.next.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, category: &str) -> bool {
        self.next.contains_key(category)
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = TransitionTable::standard();
        assert_eq!(table.next_categories("Tea"), ["Fast Food", "Café", "Lunch"]);
        assert_eq!(table.next_categories("Fast Food"), ["Tea", "Café"]);
        assert_eq!(table.next_categories("Café"), ["Tea", "Tiffin", "Lunch"]);
    }

    #[test]
    fn test_unmapped_is_empty() {
        let table = TransitionTable::standard();
        assert!(table.next_categories("Dessert").is_empty());
        assert!(table.next_categories("tea").is_empty());
        assert!(!table.contains("Dessert"));
    }
}
