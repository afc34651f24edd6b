//! Shared fixtures for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use value_bot::providers::ProviderResult;
use value_bot::{
    CompanyProfile, DataProvider, DataProviderManager, SelectionConfig, SqliteStore,
    TickerRegistry,
};

/// Provider answering from a fixed table of known tickers
#[derive(Default)]
pub struct ScriptedProvider {
    known: HashMap<String, (Option<String>, Option<String>)>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ticker: &str, name: &str, category: &str) -> Self {
        self.known.insert(
            ticker.to_string(),
            (Some(name.to_string()), Some(category.to_string())),
        );
        self
    }

    pub fn with_partial(mut self, ticker: &str, name: Option<&str>, category: Option<&str>) -> Self {
        self.known.insert(
            ticker.to_string(),
            (name.map(ToString::to_string), category.map(ToString::to_string)),
        );
        self
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn evaluate_ticker(&self, ticker: &str) -> ProviderResult<bool> {
        Ok(self.known.contains_key(ticker))
    }

    async fn get_profile(&self, ticker: &str) -> ProviderResult<Option<CompanyProfile>> {
        Ok(self
            .known
            .get(ticker)
            .map(|(name, category)| CompanyProfile::new(ticker, name.clone(), category.clone())))
    }
}

/// Registry over a throw-away database
pub fn registry(
    provider: ScriptedProvider,
    config: SelectionConfig,
) -> (tempfile::TempDir, TickerRegistry) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = Arc::new(SqliteStore::new(dir.path().join("selection.sqlite")));
    let providers = DataProviderManager::new(vec![Box::new(provider)]);
    let registry =
        TickerRegistry::new(store, providers, Arc::new(config)).expect("registry opens");
    (dir, registry)
}

pub fn market() -> ScriptedProvider {
    ScriptedProvider::new()
        .with("AAPL", "Apple Inc", "Technology")
        .with("MSFT", "Microsoft Corporation", "Software")
        .with("KO", "The Coca-Cola Company", "Beverages")
}
