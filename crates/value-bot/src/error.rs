//! Error types for stock selection operations

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Profile field that a provider failed to supply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    CompanyName,
    Category,
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompanyName => f.write_str("company name"),
            Self::Category => f.write_str("category"),
        }
    }
}

/// Errors raised by the selection registry and the command layer
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Ticker symbol is malformed
    #[error("Invalid ticker: {0:?}")]
    InvalidTicker(String),

    /// Ticker is already part of the selection
    #[error("Ticker {0} is already present in the selection")]
    DuplicateTicker(String),

    /// No data provider confirmed the ticker
    #[error("Could not evaluate stock {0} with the data providers")]
    UnknownTicker(String),

    /// Ticker exists but no provider returned a profile
    #[error("Could not retrieve a company profile for {0}")]
    ProfileUnavailable(String),

    /// Provider profile lacks a required field
    #[error("Could not evaluate {field} for stock {ticker} with the data providers")]
    IncompleteProfile { ticker: String, field: ProfileField },

    /// Ticker is not part of the selection
    #[error("Provided stock {0} does not exist in the selection")]
    NotFound(String),

    /// Storage operation failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command could not be parsed
    #[error("Command error: {0}")]
    Command(String),
}

/// Errors raised by the SQLite storage gateway
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Errors raised by market data providers
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider answered with an error payload
    #[error("{provider} error: {message}")]
    Api { provider: String, message: String },

    /// Provider did not answer in time
    #[error("{provider} did not answer within {timeout:?}")]
    Timeout { provider: String, timeout: Duration },

    /// Provider is enabled but lacks settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// No enabled provider returned a profile
    #[error("No data provider returned a profile for {0}")]
    NoProfile(String),
}

impl ProviderError {
    pub(crate) fn api(provider: &str, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for selection operations
pub type Result<T> = std::result::Result<T, SelectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SelectionError::DuplicateTicker("AAPL".to_string());
        assert_eq!(err.to_string(), "Ticker AAPL is already present in the selection");

        let err = SelectionError::IncompleteProfile {
            ticker: "MSFT".to_string(),
            field: ProfileField::Category,
        };
        assert_eq!(
            err.to_string(),
            "Could not evaluate category for stock MSFT with the data providers"
        );

        let err = SelectionError::IncompleteProfile {
            ticker: "MSFT".to_string(),
            field: ProfileField::CompanyName,
        };
        assert!(err.to_string().contains("company name"));
    }

    #[test]
    fn test_storage_error_conversion() {
        let storage_err = StorageError::Sqlite(rusqlite::Error::QueryReturnedNoRows);
        let err: SelectionError = storage_err.into();

        match err {
            SelectionError::Persistence(inner) => {
                assert!(inner.to_string().contains("SQLite error"));
            }
            _ => panic!("Expected Persistence variant"),
        }
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::api("FMP", "Invalid API KEY");
        assert_eq!(err.to_string(), "FMP error: Invalid API KEY");

        let err = ProviderError::NoProfile("XYZ".to_string());
        assert!(err.to_string().contains("XYZ"));
    }
}
