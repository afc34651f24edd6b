//! Yahoo Finance provider
//!
//! The chart API carries quotes but no company metadata, so this provider can only
//! confirm that a ticker trades. Profiles must come from another provider.

use super::{DataProvider, ProviderResult};
use crate::error::ProviderError;
use crate::model::CompanyProfile;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use yahoo_finance_api as yahoo;

const NAME: &str = "Yahoo Finance";

/// Yahoo Finance existence checker
#[derive(Debug, Clone)]
pub struct YahooProvider {
    timeout: Duration,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Unknown symbols come back as empty or "Not Found" payloads; anything else is a failure
fn classify_error(ticker: &str, error: yahoo::YahooError) -> ProviderResult<bool> {
    use yahoo::YahooError;

    let unknown_symbol = match &error {
        YahooError::NoResult | YahooError::NoQuotes | YahooError::DataInconsistency => true,
        YahooError::ApiError(message) => message
            .code
            .as_deref()
            .is_some_and(|code| code.eq_ignore_ascii_case("Not Found")),
        _ => false,
    };

    if unknown_symbol {
        debug!(ticker, error = %error, "Yahoo Finance did not confirm ticker");
        Ok(false)
    } else {
        Err(ProviderError::api(NAME, error.to_string()))
    }
}

#[async_trait]
impl DataProvider for YahooProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn evaluate_ticker(&self, ticker: &str) -> ProviderResult<bool> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| ProviderError::api(NAME, e.to_string()))?;

        let lookup = connector.get_latest_quotes(ticker, "1d");
        let response = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| ProviderError::Timeout {
                provider: NAME.to_string(),
                timeout: self.timeout,
            })?;

        match response {
            Ok(response) => Ok(response.last_quote().is_ok()),
            Err(e) => classify_error(ticker, e),
        }
    }

    async fn get_profile(&self, _ticker: &str) -> ProviderResult<Option<CompanyProfile>> {
        Ok(None)
    }
}
