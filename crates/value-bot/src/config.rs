//! Configuration for the stock selection bot

use crate::error::{Result, SelectionError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Market data provider variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Financial Modeling Prep (requires API key)
    Fmp,
    /// Alpha Vantage (requires API key)
    AlphaVantage,
    /// Yahoo Finance (no API key required, existence checks only)
    Yahoo,
}

impl ProviderKind {
    /// Whether this provider needs an API key
    pub fn requires_api_key(self) -> bool {
        matches!(self, Self::Fmp | Self::AlphaVantage)
    }

    /// Environment variable holding the API key
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            Self::Fmp => Some("FMP_API_KEY"),
            Self::AlphaVantage => Some("ALPHA_VANTAGE_API_KEY"),
            Self::Yahoo => None,
        }
    }
}

/// Settings of one data provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ProviderSettings {
    /// Enabled provider without API key
    pub fn enabled(kind: ProviderKind) -> Self {
        Self {
            kind,
            enabled: true,
            api_key: None,
        }
    }

    /// Attach an API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Chat settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// The only chat id allowed to talk to the bot
    #[serde(default)]
    pub chat_id: Option<String>,

    /// Name used in the greeting
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
}

fn default_bot_name() -> String {
    "value investing bot".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            chat_id: None,
            bot_name: default_bot_name(),
        }
    }
}

/// Configuration for the stock selection registry and bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Tickers loaded into the selection on startup and on reload
    pub tickers: Vec<String>,

    /// SQLite database file
    pub database_file: PathBuf,

    /// Timeout for a single provider request, in seconds
    pub request_timeout_secs: u64,

    /// Data providers in priority order
    pub providers: Vec<ProviderSettings>,

    /// Chat settings
    pub chat: ChatConfig,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            tickers: Vec::new(),
            database_file: PathBuf::from("value_bot.sqlite"),
            request_timeout_secs: 30,
            providers: Vec::new(),
            chat: ChatConfig::default(),
        }
    }
}

impl SelectionConfig {
    /// Create a new configuration builder
    pub fn builder() -> SelectionConfigBuilder {
        SelectionConfigBuilder::default()
    }

    /// Load configuration from a JSON file
    ///
    /// Not validated: API keys may still arrive through [`Self::with_env_overrides`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        value_utils::read_json_file(path).map_err(|e| SelectionError::Config(format!("{e:#}")))
    }

    /// Fill missing API keys and the chat id from the environment
    pub fn with_env_overrides(mut self) -> Self {
        for provider in &mut self.providers {
            if provider.api_key.is_some() {
                continue;
            }
            if let Some(var) = provider.kind.api_key_env() {
                provider.api_key = std::env::var(var).ok();
            }
        }

        if let Ok(chat_id) = std::env::var("VALUE_BOT_CHAT_ID") {
            self.chat.chat_id = Some(chat_id);
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(SelectionError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        for provider in self.providers.iter().filter(|p| p.enabled) {
            let has_key = provider
                .api_key
                .as_deref()
                .is_some_and(|k| !k.trim().is_empty());

            if provider.kind.requires_api_key() && !has_key {
                return Err(SelectionError::Config(format!(
                    "API key required for enabled provider {:?}",
                    provider.kind
                )));
            }
        }

        Ok(())
    }

    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Providers that are switched on, in priority order
    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderSettings> {
        self.providers.iter().filter(|p| p.enabled)
    }
}

/// Builder for SelectionConfig
#[derive(Debug, Default)]
pub struct SelectionConfigBuilder {
    tickers: Option<Vec<String>>,
    database_file: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
    providers: Vec<ProviderSettings>,
    chat_id: Option<String>,
    bot_name: Option<String>,
}

impl SelectionConfigBuilder {
    /// Set the tickers to preload
    pub fn tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = Some(tickers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the SQLite database file
    pub fn database_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_file = Some(path.into());
        self
    }

    /// Set the provider request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout_secs = Some(duration.as_secs());
        self
    }

    /// Append a provider; call order is priority order
    pub fn provider(mut self, settings: ProviderSettings) -> Self {
        self.providers.push(settings);
        self
    }

    /// Set the allow-listed chat id
    pub fn chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    /// Set the bot name
    pub fn bot_name(mut self, name: impl Into<String>) -> Self {
        self.bot_name = Some(name.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SelectionConfig> {
        let defaults = SelectionConfig::default();

        let config = SelectionConfig {
            tickers: self.tickers.unwrap_or(defaults.tickers),
            database_file: self.database_file.unwrap_or(defaults.database_file),
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            providers: self.providers,
            chat: ChatConfig {
                chat_id: self.chat_id,
                bot_name: self.bot_name.unwrap_or(defaults.chat.bot_name),
            },
        };

        config.validate()?;
        Ok(config)
    }
}
