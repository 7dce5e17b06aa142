//! JSON shapes returned by NexusHub

use crate::error::{MarketError, Result};
use crate::store::{ItemId, PricePoint, Timestamp};
use chrono::NaiveDateTime;
use serde::Deserialize;

/// Format of `scannedAt`, e.g. "2019-11-22T02:33:41.000Z"
const SCAN_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Latest scan endpoint body
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LastScanResponse {
    pub scan_id: u64,
    pub scanned_at: String,
}

/// Latest scan with its timestamp already converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastScan {
    pub scan_id: u64,
    pub scanned_at: Timestamp,
}

/// Envelope used by the list endpoints
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

/// One item in the all-items snapshot
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
    pub item_id: ItemId,
    pub market_value: u64,
    pub min_buyout: u64,
    #[serde(default)]
    pub num_auctions: Option<u64>,
    #[serde(default)]
    pub quantity: Option<u64>,
}

/// One scan in an item's price history
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub scanned_at: String,
    pub market_value: u64,
    pub min_buyout: u64,
    #[serde(default)]
    pub num_auctions: Option<u64>,
    #[serde(default)]
    pub quantity: Option<u64>,
}

impl ItemSnapshot {
    pub fn price_point(&self) -> PricePoint {
        PricePoint {
            market_value: self.market_value,
            min_buyout: self.min_buyout,
            num_auctions: self.num_auctions,
            quantity: self.quantity,
        }
    }
}

impl ScanRecord {
    pub fn timestamp(&self) -> Result<Timestamp> {
        parse_scan_timestamp(&self.scanned_at)
    }

    pub fn price_point(&self) -> PricePoint {
        PricePoint {
            market_value: self.market_value,
            min_buyout: self.min_buyout,
            num_auctions: self.num_auctions,
            quantity: self.quantity,
        }
    }
}

impl TryFrom<LastScanResponse> for LastScan {
    type Error = MarketError;

    fn try_from(raw: LastScanResponse) -> Result<Self> {
        Ok(Self {
            scan_id: raw.scan_id,
            scanned_at: parse_scan_timestamp(&raw.scanned_at)?,
        })
    }
}

/// Convert a NexusHub UTC timestamp string to seconds since the epoch
pub fn parse_scan_timestamp(value: &str) -> Result<Timestamp> {
    NaiveDateTime::parse_from_str(value, SCAN_TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|source| MarketError::Timestamp {
            value: value.to_string(),
            source,
        })
}
