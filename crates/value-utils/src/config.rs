//! Settings file helpers

use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read and deserialize a JSON settings file
pub fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))
}
