//! Tests for the NexusHub client.

use std::time::{Duration, Instant};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::NexusHubClient;
use crate::config::ClientConfig;
use crate::error::MarketError;
use crate::nexushub::PriceSource;

const SERVER: &str = "earthfury-horde";

fn test_config(base_url: String) -> ClientConfig {
    ClientConfig {
        base_url,
        server: SERVER.to_string(),
        min_interval: Duration::ZERO,
        user_agent: "auction_history-tests".to_string(),
    }
}

async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── fetch_last_scan_info ─────────────────────────────────────────────

#[tokio::test]
async fn last_scan_info_converts_timestamp() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/scans/latest/earthfury-horde/",
        serde_json::json!({ "scanId": 1180, "scannedAt": "2019-11-22T02:33:41.000Z" }),
    )
    .await;

    let config = test_config(mock_server.uri());
    let scan = tokio::task::spawn_blocking(move || {
        let mut client = NexusHubClient::new(config)?;
        client.fetch_last_scan_info()
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(scan.scan_id, 1180);
    assert_eq!(scan.scanned_at, 1574390021);
}

#[tokio::test]
async fn last_scan_info_bad_timestamp_is_timestamp_error() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/scans/latest/earthfury-horde/",
        serde_json::json!({ "scanId": 1, "scannedAt": "yesterday" }),
    )
    .await;

    let config = test_config(mock_server.uri());
    let result = tokio::task::spawn_blocking(move || {
        let mut client = NexusHubClient::new(config)?;
        client.fetch_last_scan_info()
    })
    .await
    .unwrap();

    match result {
        Err(MarketError::Timestamp { value, .. }) => assert_eq!(value, "yesterday"),
        other => panic!("Expected MarketError::Timestamp, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scans/latest/earthfury-horde/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let config = test_config(mock_server.uri());
    let result = tokio::task::spawn_blocking(move || {
        let mut client = NexusHubClient::new(config)?;
        client.fetch_last_scan_info()
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(MarketError::Parse(_))));
}

#[tokio::test]
async fn error_status_is_http_status_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/earthfury-horde/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = test_config(mock_server.uri());
    let result = tokio::task::spawn_blocking(move || {
        let mut client = NexusHubClient::new(config)?;
        client.fetch_all_item_snapshots()
    })
    .await
    .unwrap();

    match result {
        Err(MarketError::HttpStatus { status, url }) => {
            assert_eq!(status.as_u16(), 503);
            assert!(url.ends_with("/items/earthfury-horde/"));
        }
        other => panic!("Expected MarketError::HttpStatus, got: {other:?}"),
    }
}

#[test]
fn unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut client = NexusHubClient::new(test_config(base_url)).unwrap();
    let result = client.fetch_last_scan_info();

    assert!(matches!(result, Err(MarketError::Network(_))));
}

// ── list endpoints ───────────────────────────────────────────────────

#[tokio::test]
async fn all_item_snapshots_tolerates_missing_counts() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/items/earthfury-horde/",
        serde_json::json!({
            "slug": "earthfury-horde",
            "data": [
                { "itemId": 2589, "marketValue": 1500, "minBuyout": 1200,
                  "numAuctions": 14, "quantity": 260 },
                { "itemId": 2592, "marketValue": 3300, "minBuyout": 3000 }
            ]
        }),
    )
    .await;

    let config = test_config(mock_server.uri());
    let snapshots = tokio::task::spawn_blocking(move || {
        let mut client = NexusHubClient::new(config)?;
        client.fetch_all_item_snapshots()
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].item_id, 2589);
    assert_eq!(snapshots[0].quantity, Some(260));
    assert_eq!(snapshots[1].num_auctions, None);
    assert_eq!(snapshots[1].quantity, None);
}

#[tokio::test]
async fn item_price_history_uses_item_path() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/items/earthfury-horde/2589/prices",
        serde_json::json!({
            "data": [
                { "scannedAt": "2019-11-22T02:33:41.000Z", "marketValue": 1500, "minBuyout": 1200 },
                { "scannedAt": "2019-11-22T08:00:00.000Z", "marketValue": 1450, "minBuyout": 1100 }
            ]
        }),
    )
    .await;

    let config = test_config(mock_server.uri());
    let records = tokio::task::spawn_blocking(move || {
        let mut client = NexusHubClient::new(config)?;
        client.fetch_item_price_history(2589)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].timestamp().unwrap(), 1574390021);
    assert_eq!(records[1].market_value, 1450);
}

#[tokio::test]
async fn item_details_keeps_arbitrary_metadata() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/item/2589",
        serde_json::json!({
            "itemId": 2589,
            "name": "Linen Cloth",
            "icon": "inv_fabric_linen_01",
            "tags": ["Trade Goods", "Cloth"]
        }),
    )
    .await;

    let config = test_config(mock_server.uri());
    let item = tokio::task::spawn_blocking(move || {
        let mut client = NexusHubClient::new(config)?;
        client.fetch_item_details(2589)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(item.name(), Some("Linen Cloth"));
    assert_eq!(item.metadata()["icon"], "inv_fabric_linen_01");
}

// ── rate limiting ────────────────────────────────────────────────────

#[tokio::test]
async fn calls_across_endpoints_share_the_limiter() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/item/1",
        serde_json::json!({ "name": "A" }),
    )
    .await;
    mount_json(
        &mock_server,
        "/items/earthfury-horde/",
        serde_json::json!({ "data": [] }),
    )
    .await;

    let mut config = test_config(mock_server.uri());
    config.min_interval = Duration::from_millis(100);

    let elapsed = tokio::task::spawn_blocking(move || {
        let mut client = NexusHubClient::new(config).unwrap();
        client.fetch_item_details(1).unwrap();
        let start = Instant::now();
        client.fetch_all_item_snapshots().unwrap();
        client.fetch_item_details(1).unwrap();
        start.elapsed()
    })
    .await
    .unwrap();

    assert!(elapsed >= Duration::from_millis(200), "elapsed {elapsed:?}");
}
