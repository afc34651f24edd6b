//! Ticker selection registry
//!
//! The registry owns the lifecycle of every [`TickerEntry`]: a ticker is only
//! written after a provider confirmed it and supplied a complete profile, and
//! it is never updated in place. Batch operations are best effort. Each item is
//! attempted, failures are logged and reported, and the batch never fails as a
//! whole.
//!
//! Storage calls are short synchronous rusqlite statements run inline on the
//! calling task; the bot serves a single operator one command at a time.

use crate::config::SelectionConfig;
use crate::error::{ProfileField, Result, SelectionError};
use crate::model::{TickerEntry, normalize_ticker};
use crate::providers::DataProviderManager;
use crate::storage::SelectionStore;
use std::sync::Arc;
use tracing::{error, info};

/// Per-item report of a batch operation
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Tickers processed successfully, normalized
    pub succeeded: Vec<String>,
    /// Tickers that failed, as supplied, with the reason
    pub failed: Vec<(String, SelectionError)>,
}

impl BatchOutcome {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, ticker: &str, result: Result<String>) {
        match result {
            Ok(normalized) => self.succeeded.push(normalized),
            Err(e) => {
                error!(ticker, error = %e, "Selection batch item failed");
                self.failed.push((ticker.to_string(), e));
            }
        }
    }
}

/// Validating CRUD layer over the selection table
pub struct TickerRegistry {
    store: Arc<dyn SelectionStore>,
    providers: DataProviderManager,
    config: Arc<SelectionConfig>,
}

impl TickerRegistry {
    /// Create a registry and make sure the schema exists
    pub fn new(
        store: Arc<dyn SelectionStore>,
        providers: DataProviderManager,
        config: Arc<SelectionConfig>,
    ) -> Result<Self> {
        store.initialize_schema()?;

        Ok(Self {
            store,
            providers,
            config,
        })
    }

    /// Settings the registry was built with
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Validate a ticker with the providers and add it to the selection
    pub async fn add(&self, ticker: &str) -> Result<TickerEntry> {
        let ticker = normalize_ticker(ticker)?;
        info!(ticker = %ticker, "Adding stock to selection ...");

        if self.store.find_by_ticker(&ticker)?.is_some() {
            return Err(SelectionError::DuplicateTicker(ticker));
        }

        if !self.providers.evaluate_ticker(&ticker).await {
            return Err(SelectionError::UnknownTicker(ticker));
        }

        let profile = self
            .providers
            .get_profile(&ticker)
            .await
            .map_err(|_| SelectionError::ProfileUnavailable(ticker.clone()))?;

        let Some(company_name) = profile.company_name() else {
            return Err(SelectionError::IncompleteProfile {
                ticker,
                field: ProfileField::CompanyName,
            });
        };

        let Some(category) = profile.category() else {
            return Err(SelectionError::IncompleteProfile {
                ticker,
                field: ProfileField::Category,
            });
        };

        let entry = TickerEntry {
            ticker,
            company_name: company_name.to_string(),
            category: category.to_string(),
        };

        self.store
            .insert(&entry.ticker, &entry.company_name, &entry.category)
            .inspect_err(|e| error!(ticker = %entry.ticker, error = %e, "Failed to store ticker"))?;

        info!(ticker = %entry.ticker, company = %entry.company_name, "Added stock to selection");
        Ok(entry)
    }

    /// Remove a ticker from the selection
    pub async fn remove(&self, ticker: &str) -> Result<()> {
        let ticker = normalize_ticker(ticker)?;
        info!(ticker = %ticker, "Removing stock from selection ...");

        if self.store.find_by_ticker(&ticker)?.is_none() {
            return Err(SelectionError::NotFound(ticker));
        }

        self.store
            .remove(&ticker)
            .inspect_err(|e| error!(ticker = %ticker, error = %e, "Failed to delete ticker"))?;

        Ok(())
    }

    /// All tickers in the selection
    pub async fn list(&self) -> Result<Vec<String>> {
        info!("Get stocks from selection ...");
        Ok(self.store.list_tickers()?)
    }

    /// Stored profile of one ticker
    pub async fn entry(&self, ticker: &str) -> Result<TickerEntry> {
        let ticker = normalize_ticker(ticker)?;
        self.store
            .find_by_ticker(&ticker)?
            .ok_or(SelectionError::NotFound(ticker))
    }

    /// Stored profiles of the whole selection
    pub async fn entries(&self) -> Result<Vec<TickerEntry>> {
        Ok(self.store.list_entries()?)
    }

    /// Add each ticker, continuing past failures
    pub async fn add_many<S: AsRef<str>>(&self, tickers: &[S]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for ticker in tickers {
            let ticker = ticker.as_ref();
            let result = self.add(ticker).await.map(|entry| entry.ticker);
            outcome.record(ticker, result);
        }
        outcome
    }

    /// Remove each ticker, continuing past failures
    pub async fn remove_many<S: AsRef<str>>(&self, tickers: &[S]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for ticker in tickers {
            let ticker = ticker.as_ref();
            let result = match normalize_ticker(ticker) {
                Ok(normalized) => self.remove(&normalized).await.map(|()| normalized),
                Err(e) => Err(e),
            };
            outcome.record(ticker, result);
        }
        outcome
    }

    /// Add every ticker listed in the configuration
    pub async fn reload_from_config(&self) -> BatchOutcome {
        info!("Initializing provided stocks from config ...");
        let tickers = self.config.tickers.clone();
        let outcome = self.add_many(&tickers).await;

        info!(
            added = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Reloaded stock selection from config"
        );
        outcome
    }

    /// Remove every ticker from the selection
    pub async fn clear_all(&self) -> BatchOutcome {
        info!("Removing stocks selection ...");

        let tickers = match self.list().await {
            Ok(tickers) => tickers,
            Err(e) => {
                error!(error = %e, "Could not list the selection");
                return BatchOutcome::default();
            }
        };

        let outcome = self.remove_many(&tickers).await;
        info!(removed = outcome.succeeded.len(), "Removed stock selection");
        outcome
    }
}
