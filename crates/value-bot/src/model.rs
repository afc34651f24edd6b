//! Selection data model

use crate::error::{Result, SelectionError};
use serde::{Deserialize, Serialize};

const MAX_TICKER_LEN: usize = 12;

/// One watched stock stored in the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEntry {
    pub ticker: String,
    pub company_name: String,
    pub category: String,
}

/// Company metadata as answered by a data provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub ticker: String,
    pub company_name: Option<String>,
    pub category: Option<String>,
}

impl CompanyProfile {
    pub fn new(
        ticker: impl Into<String>,
        company_name: Option<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            company_name,
            category,
        }
    }

    /// Company name, if present and not blank
    pub fn company_name(&self) -> Option<&str> {
        non_blank(self.company_name.as_deref())
    }

    /// Category, if present and not blank
    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// True when the provider returned neither a name nor a category
    pub fn is_empty(&self) -> bool {
        self.company_name().is_none() && self.category().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Normalize a user supplied ticker symbol
///
/// Trims and upper-cases the input. Accepts 1 to 12 ASCII letters, digits, `.`, `-` or `^`.
pub fn normalize_ticker(raw: &str) -> Result<String> {
    let ticker = raw.trim().to_ascii_uppercase();

    let valid_chars = ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^'));

    if ticker.is_empty() || ticker.len() > MAX_TICKER_LEN || !valid_chars {
        return Err(SelectionError::InvalidTicker(raw.to_string()));
    }

    Ok(ticker)
}

/// Split a chat message into ticker symbols
///
/// Commas and whitespace both separate symbols; empty pieces are dropped.
pub fn split_tickers(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}
