//! Alpha Vantage provider

use super::{DataProvider, ProviderResult};
use crate::error::ProviderError;
use crate::model::CompanyProfile;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const NAME: &str = "Alpha Vantage";

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Company overview data
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CompanyOverview {
    symbol: String,
    name: Option<String>,
    sector: Option<String>,
    industry: Option<String>,
}

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage client with API key and request timeout
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> ProviderResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at another host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn query(&self, function: &str, symbol: &str) -> ProviderResult<serde_json::Value> {
        let mut params = HashMap::new();
        params.insert("function", function);
        params.insert("symbol", symbol);
        params.insert("apikey", &self.api_key);

        let response = self.client.get(&self.base_url).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::api(
                NAME,
                format!("HTTP error: {}", response.status()),
            ));
        }

        let data: serde_json::Value = response.json().await?;
        check_api_message(&data)?;
        Ok(data)
    }
}

/// Alpha Vantage reports failures inside a 200 response
fn check_api_message(data: &serde_json::Value) -> ProviderResult<()> {
    if let Some(error) = data.get("Error Message") {
        return Err(ProviderError::api(NAME, error.to_string()));
    }

    if let Some(note) = data.get("Note").or_else(|| data.get("Information")) {
        return Err(ProviderError::api(NAME, note.to_string()));
    }

    Ok(())
}

fn parse_quote_exists(data: &serde_json::Value) -> bool {
    data.get("Global Quote")
        .and_then(serde_json::Value::as_object)
        .is_some_and(|quote| !quote.is_empty())
}

/// Alpha Vantage writes the literal string "None" for missing overview fields
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| v != "None" && v != "-")
}

fn parse_overview(ticker: &str, data: serde_json::Value) -> ProviderResult<Option<CompanyProfile>> {
    // Unknown symbols come back as an empty object
    if data.as_object().is_none_or(serde_json::Map::is_empty) {
        return Ok(None);
    }

    let overview: CompanyOverview = serde_json::from_value(data)?;
    if !overview.symbol.eq_ignore_ascii_case(ticker) {
        return Ok(None);
    }

    Ok(Some(CompanyProfile::new(
        ticker,
        present(overview.name),
        present(overview.industry).or_else(|| present(overview.sector)),
    )))
}

#[async_trait]
impl DataProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn evaluate_ticker(&self, ticker: &str) -> ProviderResult<bool> {
        let data = self.query("GLOBAL_QUOTE", ticker).await?;
        Ok(parse_quote_exists(&data))
    }

    async fn get_profile(&self, ticker: &str) -> ProviderResult<Option<CompanyProfile>> {
        let data = self.query("OVERVIEW", ticker).await?;
        parse_overview(ticker, data)
    }
}
