//! Top-level error of the refresher binary.
use thiserror::Error;
use ticker_common::{ConfigError, FetchError};

/// Errors that end the process.
#[derive(Error, Debug)]
pub enum RefresherError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Single-shot fetch (`--once`) failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ctrl+C handler could not be installed.
    #[error("Signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),

    /// Tickers could not be written to stdout.
    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
