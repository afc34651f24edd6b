//! Ordered aggregation over the enabled data providers

use super::{DataProvider, ProviderResult, build_provider};
use crate::config::SelectionConfig;
use crate::error::ProviderError;
use crate::model::CompanyProfile;
use tracing::{info, warn};

/// Holds the enabled providers in priority order; the first positive answer wins
pub struct DataProviderManager {
    providers: Vec<Box<dyn DataProvider>>,
}

impl DataProviderManager {
    /// Create a manager from already built providers
    pub fn new(providers: Vec<Box<dyn DataProvider>>) -> Self {
        Self { providers }
    }

    /// Build every enabled provider listed in the configuration
    pub fn from_config(config: &SelectionConfig) -> ProviderResult<Self> {
        info!("Starting all data providers ...");

        let mut providers = Vec::new();
        for settings in config.enabled_providers() {
            info!("Enabling data provider {:?} ...", settings.kind);
            providers.push(build_provider(settings, config.request_timeout())?);
        }

        if providers.is_empty() {
            warn!("No data provider enabled, every ticker will be rejected");
        }

        Ok(Self::new(providers))
    }

    /// Provider names in priority order
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// True as soon as one provider confirms the ticker
    ///
    /// Provider failures count as "not confirmed".
    pub async fn evaluate_ticker(&self, ticker: &str) -> bool {
        for provider in &self.providers {
            match provider.evaluate_ticker(ticker).await {
                Ok(true) => {
                    info!(ticker, provider = provider.name(), "Ticker exists");
                    return true;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(ticker, provider = provider.name(), error = %e, "Ticker evaluation failed");
                }
            }
        }

        false
    }

    /// First non-empty profile in priority order
    pub async fn get_profile(&self, ticker: &str) -> ProviderResult<CompanyProfile> {
        for provider in &self.providers {
            match provider.get_profile(ticker).await {
                Ok(Some(profile)) if !profile.is_empty() => return Ok(profile),
                Ok(_) => {}
                Err(e) => {
                    warn!(ticker, provider = provider.name(), error = %e, "Profile lookup failed");
                }
            }
        }

        Err(ProviderError::NoProfile(ticker.to_string()))
    }
}
