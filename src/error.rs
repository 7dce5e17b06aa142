//! Error types for auction_history

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for update and query operations
#[derive(Debug, Error)]
pub enum MarketError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// NexusHub answered with a non-success status code
    #[error("HTTP error {status} from {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to parse a JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server timestamp did not match the expected scan format
    #[error("Unexpected scan timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// No tracked item name contains the query
    #[error("No results for \"{0}\"")]
    NotFound(String),

    /// Disambiguation input outside 1..=candidates
    #[error("Invalid selection {selection} (expected 1-{candidates})")]
    InvalidSelection { selection: i64, candidates: usize },

    /// The database file exists but is not a readable store
    #[error("Database file {} is corrupt: {source}", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl MarketError {
    /// Query-side outcomes that are reported to the user and end the
    /// process normally rather than as a failure.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            MarketError::NotFound(_) | MarketError::InvalidSelection { .. }
        )
    }
}

/// Result alias for auction_history operations
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_are_user_facing() {
        assert!(MarketError::NotFound("mithril".to_string()).is_user_facing());
        assert!(MarketError::InvalidSelection {
            selection: 0,
            candidates: 2
        }
        .is_user_facing());
    }

    #[test]
    fn corrupt_store_is_fatal() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = MarketError::CorruptStore {
            path: PathBuf::from("db.json"),
            source,
        };
        assert!(!err.is_user_facing());
        assert!(err.to_string().contains("db.json"));
    }

    #[test]
    fn invalid_selection_message_names_range() {
        let err = MarketError::InvalidSelection {
            selection: 5,
            candidates: 3,
        };
        assert_eq!(err.to_string(), "Invalid selection 5 (expected 1-3)");
    }
}
