//! Blocking NexusHub client

use super::endpoint::Endpoint;
use super::rate_limiter::RateLimiter;
use super::wire::{DataEnvelope, ItemSnapshot, LastScan, LastScanResponse, ScanRecord};
use super::PriceSource;
use crate::config::ClientConfig;
use crate::error::{MarketError, Result};
use crate::store::{Item, ItemId};
use serde::de::DeserializeOwned;

pub struct NexusHubClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
    limiter: RateLimiter,
}

impl NexusHubClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        let limiter = RateLimiter::new(config.min_interval);
        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch an endpoint through the rate limiter and decode its body
    fn get_json<T: DeserializeOwned>(&mut self, endpoint: Endpoint) -> Result<T> {
        let url = endpoint.url(&self.config.base_url, &self.config.server);
        let http = &self.http;

        let body = self.limiter.throttle(|| -> Result<String> {
            log::debug!("GET {}", url);
            let response = http.get(&url).send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(MarketError::HttpStatus {
                    url: url.clone(),
                    status,
                });
            }
            Ok(response.text()?)
        })?;

        Ok(serde_json::from_str(&body)?)
    }
}

impl PriceSource for NexusHubClient {
    fn fetch_last_scan_info(&mut self) -> Result<LastScan> {
        let raw: LastScanResponse = self.get_json(Endpoint::LastScan)?;
        LastScan::try_from(raw)
    }

    fn fetch_all_item_snapshots(&mut self) -> Result<Vec<ItemSnapshot>> {
        let envelope: DataEnvelope<ItemSnapshot> = self.get_json(Endpoint::AllItems)?;
        Ok(envelope.data)
    }

    fn fetch_item_price_history(&mut self, item_id: ItemId) -> Result<Vec<ScanRecord>> {
        let envelope: DataEnvelope<ScanRecord> =
            self.get_json(Endpoint::ItemPriceHistory(item_id))?;
        Ok(envelope.data)
    }

    fn fetch_item_details(&mut self, item_id: ItemId) -> Result<Item> {
        self.get_json(Endpoint::ItemDetails(item_id))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
