//! NexusHub endpoints consumed by the scraper

use crate::store::ItemId;

/// Every remote resource the client may request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Latest scan id and timestamp for the server
    LastScan,
    /// Current snapshot of every item on the server
    AllItems,
    /// Price history (recent scans) for one item on the server
    ItemPriceHistory(ItemId),
    /// Server-independent item metadata
    ItemDetails(ItemId),
}

impl Endpoint {
    /// Path relative to the API root
    pub fn path(&self, server: &str) -> String {
        match self {
            Endpoint::LastScan => format!("scans/latest/{}/", server),
            Endpoint::AllItems => format!("items/{}/", server),
            Endpoint::ItemPriceHistory(id) => format!("items/{}/{}/prices", server, id),
            Endpoint::ItemDetails(id) => format!("item/{}", id),
        }
    }

    /// Absolute URL under `base_url`
    pub fn url(&self, base_url: &str, server: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path(server))
    }
}
