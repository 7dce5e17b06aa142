//! Runtime configuration shared by the CLI and the NexusHub client

use std::path::PathBuf;
use std::time::Duration;

/// NexusHub WoW Classic API root
pub const DEFAULT_API_URL: &str = "https://api.nexushub.co/wow-classic/v1";

/// Realm/faction slug whose auction house is tracked
pub const DEFAULT_SERVER: &str = "earthfury-horde";

/// NexusHub allows 20 calls per 5 seconds, i.e. one call every 250ms.
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 250;

const USER_AGENT: &str = "auction_history/1.0";

/// Settings for talking to NexusHub
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub server: String,
    pub min_interval: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            server: DEFAULT_SERVER.to_string(),
            min_interval: Duration::from_millis(DEFAULT_MIN_INTERVAL_MS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at a different API root (mock servers, mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Returns the default database path: ~/.local/share/auction_history/db.json
pub fn default_db_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("auction_history")
        .join("db.json")
        .to_string_lossy()
        .to_string()
}
