//! Error types shared between the config loader and the refresh loop.
//!
//! Two tiers are modelled separately:
//! - `ConfigError` — startup failures. Every variant is fatal to the process.
//! - `FetchError` — failures of a single fetch attempt. None of them stop the loop;
//!   they are classified with `FetchError::kind` and logged.
use std::io;
use std::path::PathBuf;

use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Startup error raised while loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Configuration file not found at path: {}", .0.display())]
    NotFound(PathBuf),

    /// Any other I/O failure while reading the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid YAML or a value has the wrong type.
    #[error("Error parsing YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Required parameters are missing or invalid.
    #[error("Some configuration parameters are missing or invalid: {0}")]
    Configuration(String),
}

/// Failure of a single fetch attempt.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Bad or missing credential, or the remote rejected it.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Spreadsheet or tab is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Ticker column is absent from the header row.
    #[error("Ticker header '{header}' not found in sheet columns")]
    Schema {
        /// Header name that was searched for.
        header: String,
    },

    /// Remote API or network failure.
    #[error("Google Sheets API error: {0}")]
    Remote(String),

    /// Anything that does not fit the other categories.
    #[error("Unexpected error grabbing tickers: {0}")]
    Unknown(String),
}

/// Classification of a `FetchError`, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum FetchErrorKind {
    /// See [`FetchError::Auth`].
    Auth,
    /// See [`FetchError::NotFound`].
    NotFound,
    /// See [`FetchError::Schema`].
    Schema,
    /// See [`FetchError::Remote`].
    Remote,
    /// See [`FetchError::Unknown`].
    Unknown,
}

impl FetchError {
    /// Returns the category of this error.
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Auth(_) => FetchErrorKind::Auth,
            FetchError::NotFound(_) => FetchErrorKind::NotFound,
            FetchError::Schema { .. } => FetchErrorKind::Schema,
            FetchError::Remote(_) => FetchErrorKind::Remote,
            FetchError::Unknown(_) => FetchErrorKind::Unknown,
        }
    }
}
