use crate::item::{FoodType, ItemRecord, ScoredItem};
use crate::score::{max_total_order, score};
use crate::{Error, Result};
use ahash::AHashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const COL_AREA: &str = "Area";
pub const COL_TYPE: &str = "Type";
pub const COL_FOOD_TYPE: &str = "Food_Type";
pub const COL_NAME: &str = "Name";
pub const COL_ITEM_NAME: &str = "Item_Name";
pub const COL_PRICE: &str = "Price";
pub const COL_AVG_RATING: &str = "Avg_Rating";
pub const COL_TOTAL_ORDER: &str = "Total_Order";

const REQUIRED_COLUMNS: [&str; 8] = [
    COL_AREA,
    COL_TYPE,
    COL_FOOD_TYPE,
    COL_NAME,
    COL_ITEM_NAME,
    COL_PRICE,
    COL_AVG_RATING,
    COL_TOTAL_ORDER,
];

/// Counters reported after a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub loaded: usize,
    pub dropped: usize,
}

/// The immutable, scored item table for one city
///
/// Items keep their load order ("catalog order"); every lookup returns
/// items in that order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ScoredItem>,
    max_total_order: u64,
    by_area: AHashMap<String, Vec<usize>>,
    by_category: AHashMap<String, Vec<usize>>,
    by_vendor: AHashMap<String, Vec<usize>>,
    stats: LoadStats,
}

impl Catalog {
    /// Load a catalog from a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            "Loaded catalog {:?}: {} items, {} incomplete rows dropped",
            path,
            catalog.stats.loaded,
            catalog.stats.dropped
        );
        Ok(catalog)
    }

    /// Load a catalog from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut columns = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))?;
        }

        let mut records = Vec::new();
        let mut dropped = 0usize;

        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            let mut cells = [""; REQUIRED_COLUMNS.len()];
            let mut complete = true;
            for (cell, &idx) in cells.iter_mut().zip(columns.iter()) {
                match row.get(idx) {
                    Some(value) if !value.is_empty() => *cell = value,
                    _ => {
                        complete = false;
                        break;
                    }
                }
            }
            if !complete {
                tracing::debug!("Dropping incomplete catalog row at line {}", line);
                dropped += 1;
                continue;
            }

            records.push(parse_row(&cells, line)?);
        }

        let mut catalog = Self::from_records(records);
        catalog.stats.dropped = dropped;
        Ok(catalog)
    }

    /// Build a catalog from records already in catalog order
    pub fn from_records(records: Vec<ItemRecord>) -> Self {
        let max_total_order = max_total_order(&records);

        let mut by_area: AHashMap<String, Vec<usize>> = AHashMap::new();
        let mut by_category: AHashMap<String, Vec<usize>> = AHashMap::new();
        let mut by_vendor: AHashMap<String, Vec<usize>> = AHashMap::new();

        let items: Vec<ScoredItem> = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                by_area.entry(record.area.clone()).or_default().push(position);
                by_category
                    .entry(record.category.clone())
                    .or_default()
                    .push(position);
                by_vendor
                    .entry(record.vendor_name.clone())
                    .or_default()
                    .push(position);
                let s = score(&record, max_total_order);
                ScoredItem::new(record, s, position)
            })
            .collect();

        let stats = LoadStats {
            loaded: items.len(),
            dropped: 0,
        };

        Self {
            items,
            max_total_order,
            by_area,
            by_category,
            by_vendor,
            stats,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in catalog order
    #[inline]
    pub fn items(&self) -> &[ScoredItem] {
        &self.items
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<&ScoredItem> {
        self.items.get(position)
    }

    #[inline]
    pub fn max_total_order(&self) -> u64 {
        self.max_total_order
    }

    #[inline]
    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn by_area(&self, area: &str) -> Vec<&ScoredItem> {
        self.lookup(&self.by_area, area)
    }

    pub fn by_category(&self, category: &str) -> Vec<&ScoredItem> {
        self.lookup(&self.by_category, category)
    }

    pub fn by_vendor(&self, vendor: &str) -> Vec<&ScoredItem> {
        self.lookup(&self.by_vendor, vendor)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.by_category.contains_key(category)
    }

    /// Distinct areas, sorted
    pub fn areas(&self) -> Vec<&str> {
        sorted_keys(&self.by_area)
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<&str> {
        sorted_keys(&self.by_category)
    }

    /// Distinct vendor names, sorted
    pub fn vendors(&self) -> Vec<&str> {
        sorted_keys(&self.by_vendor)
    }

    /// Sorted areas that carry at least one item of `category`
    pub fn areas_with_category(&self, category: &str) -> Vec<&str> {
        let mut areas: Vec<&str> = self
            .by_category(category)
            .into_iter()
            .map(|item| item.area())
            .collect();
        areas.sort_unstable();
        areas.dedup();
        areas
    }

    fn lookup(&self, index: &AHashMap<String, Vec<usize>>, key: &str) -> Vec<&ScoredItem> {
        index
            .get(key)
            .map(|positions| positions.iter().map(|&p| &self.items[p]).collect())
            .unwrap_or_default()
    }
}

fn sorted_keys(index: &AHashMap<String, Vec<usize>>) -> Vec<&str> {
    let mut keys: Vec<&str> = index.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

fn parse_row(cells: &[&str; REQUIRED_COLUMNS.len()], line: u64) -> Result<ItemRecord> {
    let [area, category, food_type, vendor, item, price, rating, orders] = *cells;

    let malformed = |column: &'static str, value: &str| Error::Malformed {
        column,
        line,
        value: value.to_string(),
    };

    let food_type: FoodType = food_type
        .parse()
        .map_err(|_| malformed(COL_FOOD_TYPE, food_type))?;

    let price_value: f64 = price
        .parse()
        .ok()
        .filter(|p: &f64| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| malformed(COL_PRICE, price))?;

    let rating_value: f64 = rating
        .parse()
        .ok()
        .filter(|r: &f64| r.is_finite() && *r >= 0.0)
        .ok_or_else(|| malformed(COL_AVG_RATING, rating))?;

    let total_order = parse_order_count(orders).ok_or_else(|| malformed(COL_TOTAL_ORDER, orders))?;

    Ok(ItemRecord {
        vendor_name: vendor.to_string(),
        item_name: item.to_string(),
        area: area.to_string(),
        category: category.to_string(),
        food_type,
        price: price_value,
        avg_rating: rating_value,
        total_order,
    })
}

// Spreadsheet exports often write counts as "120.0".
fn parse_order_count(value: &str) -> Option<u64> {
    if let Ok(n) = value.parse::<u64>() {
        return Some(n);
    }
    let f: f64 = value.parse().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}
