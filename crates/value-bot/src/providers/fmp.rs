//! Financial Modeling Prep provider

use super::{DataProvider, ProviderResult};
use crate::error::ProviderError;
use crate::model::CompanyProfile;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://financialmodelingprep.com/api/v3";
const NAME: &str = "FMP";

/// Financial Modeling Prep API client
#[derive(Debug, Clone)]
pub struct FmpProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Company profile as returned by `/profile/{symbol}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmpProfile {
    symbol: String,
    company_name: Option<String>,
    industry: Option<String>,
    sector: Option<String>,
}

impl FmpProvider {
    /// Create a new FMP client with API key and request timeout
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

    async fn get_json(&self, endpoint: &str, ticker: &str) -> ProviderResult<serde_json::Value> {
        let url = format!("{}/{endpoint}/{ticker}", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::api(
                NAME,
                format!("HTTP error: {}", response.status()),
            ));
        }

        let data: serde_json::Value = response.json().await?;

        if let Some(error) = data.get("Error Message") {
            return Err(ProviderError::api(NAME, error.to_string()));
        }

        Ok(data)
    }
}

/// A `quote-short` answer confirms the ticker when it carries at least one quote
fn parse_quote_exists(data: &serde_json::Value) -> bool {
    data.as_array().is_some_and(|quotes| !quotes.is_empty())
}

fn parse_profile(ticker: &str, data: serde_json::Value) -> ProviderResult<Option<CompanyProfile>> {
    let profiles: Vec<FmpProfile> = serde_json::from_value(data)?;

    let Some(profile) = profiles
        .into_iter()
        .find(|p| p.symbol.eq_ignore_ascii_case(ticker))
    else {
        return Ok(None);
    };

    Ok(Some(CompanyProfile::new(
        ticker,
        profile.company_name,
        profile.industry.or(profile.sector),
    )))
}

#[async_trait]
impl DataProvider for FmpProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn evaluate_ticker(&self, ticker: &str) -> ProviderResult<bool> {
        let data = self.get_json("quote-short", ticker).await?;
        Ok(parse_quote_exists(&data))
    }

    async fn get_profile(&self, ticker: &str) -> ProviderResult<Option<CompanyProfile>> {
        let data = self.get_json("profile", ticker).await?;
        parse_profile(ticker, data)
    }
}
