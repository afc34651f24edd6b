//! Shared utilities for value-bot
//!
//! This crate provides common functionality used across the value-bot workspace:
//! logging setup and loading of JSON settings files.

pub mod config;
pub mod logging;

pub use config::read_json_file;
pub use logging::{LogFormat, init_tracing, init_tracing_with};
