//! Auction History - WoW Classic auction house price tracker
//!
//! This crate keeps an append-only local record of NexusHub auction house
//! scans and answers price-history queries for individual items.

pub mod config;
pub mod error;
pub mod formatters;
pub mod nexushub;
pub mod query;
pub mod store;
pub mod update;

pub use config::{default_db_path, ClientConfig};
pub use error::{MarketError, Result};
pub use formatters::{export_history, format_history, history_rows, ExportFormat, HistoryRow, Money};
pub use nexushub::{NexusHubClient, PriceSource};
pub use query::{resolve, Candidate};
pub use store::{Item, ItemId, PricePoint, Store, Timestamp};
pub use update::{refresh, Outcome, RefreshReport};
