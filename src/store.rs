//! Local market database
//!
//! The whole database lives in memory as a [`Store`] and is read from and
//! written to a single JSON file. Price history is append-only: a timestamp
//! that already exists for an item is never overwritten.

use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// NexusHub item id
pub type ItemId = u64;

/// Seconds since the Unix epoch
pub type Timestamp = i64;

/// Price history of a single item, ordered by timestamp
pub type PriceHistory = BTreeMap<Timestamp, PricePoint>;

/// One observation of an item's auction house prices.
///
/// Currency values are in copper (1g = 100s = 10000c).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub market_value: u64,
    pub min_buyout: u64,
    /// Not reported by per-item history scans
    #[serde(default)]
    pub num_auctions: Option<u64>,
    #[serde(default)]
    pub quantity: Option<u64>,
}

/// Item metadata exactly as NexusHub returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(serde_json::Value);

impl Item {
    pub fn new(metadata: serde_json::Value) -> Self {
        Self(metadata)
    }

    /// Display name, if the metadata carries one
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(serde_json::Value::as_str)
    }

    pub fn metadata(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Item {
    fn from(metadata: serde_json::Value) -> Self {
        Self(metadata)
    }
}

/// The persisted database: item catalog plus per-item price history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    last_updated: Timestamp,
    prices: BTreeMap<ItemId, PriceHistory>,
    items: BTreeMap<ItemId, Item>,
}

impl Store {
    /// Load the database from `path`, or start empty if the file does not exist.
    ///
    /// A file that exists but does not parse is reported as
    /// [`MarketError::CorruptStore`] and left untouched.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No database at {}, starting empty", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let store: Store =
            serde_json::from_str(&content).map_err(|source| MarketError::CorruptStore {
                path: path.to_path_buf(),
                source,
            })?;

        log::info!(
            "Loaded database with {} items and {} price points (last updated {})",
            store.items.len(),
            store.price_point_count(),
            store.last_updated
        );
        Ok(store)
    }

    /// Write the whole database to `path`.
    ///
    /// The content goes to a sibling temp file first and is renamed over
    /// `path` only once fully written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                log::info!("Created directory: {}", parent.display());
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        let tmp_path = temp_path(path);
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, path)?;

        log::debug!(
            "Saved database with {} items to {}",
            self.items.len(),
            path.display()
        );
        Ok(())
    }

    /// Timestamp of the most recent merged scan
    pub fn last_updated(&self) -> Timestamp {
        self.last_updated
    }

    /// Raise `last_updated` to `timestamp`; older values are ignored.
    pub fn advance_last_updated(&mut self, timestamp: Timestamp) {
        self.last_updated = self.last_updated.max(timestamp);
    }

    /// Record a price point unless the item already has one at `timestamp`.
    ///
    /// Returns `true` if the point was inserted.
    pub fn insert_price(&mut self, item_id: ItemId, timestamp: Timestamp, point: PricePoint) -> bool {
        use std::collections::btree_map::Entry;

        match self.prices.entry(item_id).or_default().entry(timestamp) {
            Entry::Vacant(slot) => {
                slot.insert(point);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Store (or replace) an item's metadata
    pub fn insert_item(&mut self, item_id: ItemId, item: Item) {
        self.items.insert(item_id, item);
    }

    pub fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.items.get(&item_id)
    }

    pub fn items(&self) -> &BTreeMap<ItemId, Item> {
        &self.items
    }

    pub fn history(&self, item_id: ItemId) -> Option<&PriceHistory> {
        self.prices.get(&item_id)
    }

    pub fn prices(&self) -> &BTreeMap<ItemId, PriceHistory> {
        &self.prices
    }

    /// Items with price history, in ascending id order
    pub fn tracked_item_ids(&self) -> Vec<ItemId> {
        self.prices.keys().copied().collect()
    }

    /// Items with price history but no metadata yet
    pub fn missing_item_ids(&self) -> Vec<ItemId> {
        self.prices
            .keys()
            .filter(|id| !self.items.contains_key(id))
            .copied()
            .collect()
    }

    /// Total number of price points across all items
    pub fn price_point_count(&self) -> usize {
        self.prices.values().map(BTreeMap::len).sum()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
