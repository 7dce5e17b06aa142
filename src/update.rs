//! Incremental update of the local database from NexusHub
//!
//! A refresh merges the newest scan into the store, optionally backfills each
//! item's recent scan history, and fetches metadata for items seen for the
//! first time. Merging never overwrites an existing (item, timestamp) entry.

use crate::error::Result;
use crate::nexushub::PriceSource;
use crate::store::{ItemId, Store, Timestamp};

/// Whether a refresh had anything to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The latest scan was already merged; the store is untouched
    UpToDate,
    Updated,
}

/// Inserted/skipped counts for one merge stage
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeCounts {
    /// New price points written
    pub inserted: usize,
    /// Points dropped because the item already had that timestamp
    pub skipped: usize,
}

impl MergeCounts {
    fn record(&mut self, inserted: bool) {
        if inserted {
            self.inserted += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// Result of a refresh run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub outcome: Outcome,
    /// Timestamp of the newest remote scan
    pub scan_timestamp: Timestamp,
    /// Latest-scan merge
    pub bulk: MergeCounts,
    /// Per-item history merge (exhaustive runs only)
    pub history: MergeCounts,
    /// Number of item details fetched
    pub items_fetched: usize,
}

impl RefreshReport {
    fn up_to_date(scan_timestamp: Timestamp) -> Self {
        Self {
            outcome: Outcome::UpToDate,
            scan_timestamp,
            bulk: MergeCounts::default(),
            history: MergeCounts::default(),
            items_fetched: 0,
        }
    }

    /// Total price points written by this run
    pub fn inserted(&self) -> usize {
        self.bulk.inserted + self.history.inserted
    }
}

/// Bring `store` up to date with the newest scan from `source`.
///
/// Without `exhaustive`, nothing happens when the store already holds the
/// newest scan. With it, every tracked item's history is fetched as well,
/// which costs one remote call per item.
///
/// On error the store may hold a partial merge; callers should not persist it.
pub fn refresh<S: PriceSource>(
    store: &mut Store,
    source: &mut S,
    exhaustive: bool,
) -> Result<RefreshReport> {
    let scan = source.fetch_last_scan_info()?;

    if store.last_updated() >= scan.scanned_at && !exhaustive {
        log::info!(
            "Nothing to update: scan {} ({}) already merged",
            scan.scan_id,
            scan.scanned_at
        );
        return Ok(RefreshReport::up_to_date(scan.scanned_at));
    }

    store.advance_last_updated(scan.scanned_at);

    let bulk = merge_latest_scan(store, source, scan.scanned_at)?;
    let history = if exhaustive {
        backfill_price_history(store, source)?
    } else {
        MergeCounts::default()
    };
    let items_fetched = backfill_item_details(store, source)?;

    Ok(RefreshReport {
        outcome: Outcome::Updated,
        scan_timestamp: scan.scanned_at,
        bulk,
        history,
        items_fetched,
    })
}

/// Merge the all-items snapshot, keyed at the scan's timestamp
fn merge_latest_scan<S: PriceSource>(
    store: &mut Store,
    source: &mut S,
    scan_timestamp: Timestamp,
) -> Result<MergeCounts> {
    log::info!("Updating market data with latest market scan...");

    let snapshots = source.fetch_all_item_snapshots()?;
    let mut counts = MergeCounts::default();
    for snapshot in &snapshots {
        counts.record(store.insert_price(snapshot.item_id, scan_timestamp, snapshot.price_point()));
    }

    log::info!(
        "Merged latest scan: {} new price points, {} already present",
        counts.inserted,
        counts.skipped
    );
    Ok(counts)
}

/// Merge each tracked item's recent scans at their own timestamps
fn backfill_price_history<S: PriceSource>(store: &mut Store, source: &mut S) -> Result<MergeCounts> {
    let item_ids = store.tracked_item_ids();
    let total = item_ids.len();
    if total > 0 {
        log::info!("Fetching price history for {} items...", total);
    }

    let mut counts = MergeCounts::default();
    for (i, item_id) in item_ids.into_iter().enumerate() {
        log::info!("{}/{}", i + 1, total);
        for record in source.fetch_item_price_history(item_id)? {
            let timestamp = record.timestamp()?;
            counts.record(store.insert_price(item_id, timestamp, record.price_point()));
        }
    }

    log::info!(
        "Merged price history: {} new price points, {} already present",
        counts.inserted,
        counts.skipped
    );
    Ok(counts)
}

/// Fetch metadata for every priced item that has none yet
fn backfill_item_details<S: PriceSource>(store: &mut Store, source: &mut S) -> Result<usize> {
    let missing: Vec<ItemId> = store.missing_item_ids();
    let total = missing.len();
    if total > 0 {
        log::info!("Fetching details for {} new items...", total);
    }

    for (i, item_id) in missing.into_iter().enumerate() {
        log::info!("{}/{}", i + 1, total);
        let item = source.fetch_item_details(item_id)?;
        store.insert_item(item_id, item);
    }
    Ok(total)
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
