//! NexusHub API client for auction house scans and item details

mod client;
mod endpoint;
mod rate_limiter;
mod wire;

pub use client::NexusHubClient;
pub use endpoint::Endpoint;
pub use rate_limiter::RateLimiter;
pub use wire::{parse_scan_timestamp, ItemSnapshot, LastScan, ScanRecord};

use crate::error::Result;
use crate::store::{Item, ItemId};

/// The remote operations the update engine needs.
///
/// `NexusHubClient` is the production implementation; tests drive the
/// engine with in-memory sources.
pub trait PriceSource {
    /// Id and UTC timestamp of the newest scan
    fn fetch_last_scan_info(&mut self) -> Result<LastScan>;

    /// Current values for every tracked item
    fn fetch_all_item_snapshots(&mut self) -> Result<Vec<ItemSnapshot>>;

    /// Recent scans for one item, each with its own timestamp
    fn fetch_item_price_history(&mut self, item_id: ItemId) -> Result<Vec<ScanRecord>>;

    /// Opaque item metadata
    fn fetch_item_details(&mut self, item_id: ItemId) -> Result<Item>;
}
