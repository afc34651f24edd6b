//! Market data providers used to validate tickers
//!
//! Each provider can confirm that a ticker exists and may know the company
//! profile behind it. [`DataProviderManager`] asks the enabled providers in
//! priority order and keeps the first positive answer.

pub mod alpha_vantage;
pub mod fmp;
pub mod manager;
pub mod yahoo;

use crate::config::{ProviderKind, ProviderSettings};
use crate::error::ProviderError;
use crate::model::CompanyProfile;
use async_trait::async_trait;
use std::time::Duration;

pub use alpha_vantage::AlphaVantageProvider;
pub use fmp::FmpProvider;
pub use manager::DataProviderManager;
pub use yahoo::YahooProvider;

/// Result type for provider calls
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Capability shared by all market data providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    /// Check whether the provider recognizes the ticker
    async fn evaluate_ticker(&self, ticker: &str) -> ProviderResult<bool>;

    /// Fetch company metadata, `None` when the ticker is unknown to this provider
    async fn get_profile(&self, ticker: &str) -> ProviderResult<Option<CompanyProfile>>;
}

/// Instantiate the provider described by `settings`
pub fn build_provider(
    settings: &ProviderSettings,
    timeout: Duration,
) -> ProviderResult<Box<dyn DataProvider>> {
    let api_key = || {
        settings.api_key.clone().ok_or_else(|| {
            ProviderError::Config(format!("API key missing for {:?}", settings.kind))
        })
    };

    let provider: Box<dyn DataProvider> = match settings.kind {
        ProviderKind::Fmp => Box::new(FmpProvider::new(api_key()?, timeout)?),
        ProviderKind::AlphaVantage => Box::new(AlphaVantageProvider::new(api_key()?, timeout)?),
        ProviderKind::Yahoo => Box::new(YahooProvider::new(timeout)),
    };

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_provider() {
        let timeout = Duration::from_secs(5);

        let settings = ProviderSettings::enabled(ProviderKind::Fmp).with_api_key("key");
        assert_eq!(build_provider(&settings, timeout).unwrap().name(), "FMP");

        let settings = ProviderSettings::enabled(ProviderKind::Yahoo);
        assert_eq!(build_provider(&settings, timeout).unwrap().name(), "Yahoo Finance");
    }

    #[test]
    fn test_build_provider_missing_key() {
        let settings = ProviderSettings::enabled(ProviderKind::AlphaVantage);
        let result = build_provider(&settings, Duration::from_secs(5));
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }
}
