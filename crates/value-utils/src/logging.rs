//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Initialize tracing subscriber with default configuration
pub fn init_tracing() {
    init_tracing_with("info", LogFormat::Pretty);
}

/// Initialize tracing with a fallback filter directive and output format
///
/// `RUST_LOG` wins over `default_directive` when it is set.
pub fn init_tracing_with(default_directive: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(filter);

    // A second init (tests, embedding) keeps the first subscriber.
    let result = match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("Tracing already initialized: {e}");
    }
}
