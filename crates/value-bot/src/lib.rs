//! Stock selection bot
//!
//! This crate lets a single operator keep a watch-list ("selection") of stock
//! tickers through chat commands. It includes:
//!
//! - A SQLite backed selection table with one row per ticker
//! - Ticker validation against market data providers (Financial Modeling Prep,
//!   Alpha Vantage, Yahoo Finance), first positive answer wins
//! - Company profile lookup (name and industry) stored alongside each ticker
//! - Best-effort batch operations: reload from configuration, clear all
//! - A command layer with a short selection dialogue for chat front ends
//!
//! # Architecture
//!
//! - `storage`: `SelectionStore` trait and its SQLite implementation
//! - `providers`: `DataProvider` trait, provider clients and the ordered `DataProviderManager`
//! - `registry`: `TickerRegistry`, the validating CRUD layer
//! - `bot`: `SelectionBot`, command parsing and reply rendering
//!
//! # Example
//!
//! ```rust,ignore
//! use value_bot::{DataProviderManager, SelectionConfig, SqliteStore, TickerRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(SelectionConfig::from_file("config.json")?);
//!     let store = Arc::new(SqliteStore::new(&config.database_file));
//!     let providers = DataProviderManager::from_config(&config)?;
//!
//!     let registry = TickerRegistry::new(store, providers, config)?;
//!     registry.add("AAPL").await?;
//!     println!("{:?}", registry.list().await?);
//!
//!     Ok(())
//! }
//! ```

pub mod bot;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod registry;
pub mod storage;

/// Crate version reported by `/version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types for convenience
pub use bot::SelectionBot;
pub use config::{ProviderKind, ProviderSettings, SelectionConfig};
pub use error::{ProfileField, ProviderError, Result, SelectionError, StorageError};
pub use model::{CompanyProfile, TickerEntry};
pub use providers::{DataProvider, DataProviderManager};
pub use registry::{BatchOutcome, TickerRegistry};
pub use storage::{SelectionStore, SqliteStore};
