//! Operating parameters loaded once at startup from a YAML file.
//!
//! Recognized keys:
//!
//! ```yaml
//! worksheet_name: Portfolio        # required, spreadsheet title
//! sheet_name: Watchlist            # required, tab inside the spreadsheet
//! refresh_rate: 60                 # seconds between fetch starts, default 60
//! rate_limit: 300                  # requests/minute, advisory, default 300
//! credentials_path: creds.json     # required, service-account key file
//! tickers_header_name: tickers     # column header, default "tickers"
//! ```
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use log::info;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::result::Result;

/// Default seconds between the starts of two fetches.
pub const DEFAULT_REFRESH_RATE_SECS: u64 = 60;
/// Default request ceiling; the Google Sheets read quota is 300 per minute.
pub const DEFAULT_RATE_LIMIT: u32 = 300;
/// Default ticker column header.
pub const DEFAULT_TICKERS_HEADER: &str = "tickers";

/// Fields as they appear in the file, before defaults and validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    worksheet_name: Option<String>,
    sheet_name: Option<String>,
    refresh_rate: Option<u64>,
    rate_limit: Option<u32>,
    credentials_path: Option<String>,
    tickers_header_name: Option<String>,
}

/// Validated, immutable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Title of the remote spreadsheet.
    pub worksheet_name: String,
    /// Tab inside the spreadsheet.
    pub sheet_name: String,
    /// Time between the starts of successive fetches. Never zero.
    pub refresh_rate: Duration,
    /// Advisory ceiling on remote requests per minute. Not enforced.
    pub rate_limit: u32,
    /// Path to the remote-auth credential.
    pub credentials_path: String,
    /// Header of the column holding the tickers.
    pub tickers_header_name: String,
}

impl Config {
    /// Reads, parses and validates the configuration at `path`.
    ///
    /// Logs the loaded values at info level before validating them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io(e),
        })?;
        Self::from_yaml(&content)
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str::<Option<RawConfig>>(content)?.unwrap_or_default()
        };

        let config = Config {
            worksheet_name: raw.worksheet_name.unwrap_or_default(),
            sheet_name: raw.sheet_name.unwrap_or_default(),
            refresh_rate: Duration::from_secs(
                raw.refresh_rate.unwrap_or(DEFAULT_REFRESH_RATE_SECS),
            ),
            rate_limit: raw.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT),
            credentials_path: raw.credentials_path.unwrap_or_default(),
            tickers_header_name: raw
                .tickers_header_name
                .map(|header| header.trim().to_string())
                .unwrap_or_else(|| DEFAULT_TICKERS_HEADER.to_string()),
        };

        info!(
            "Loaded configuration: worksheet_name={}, sheet_name={}, refresh_rate={}, \
             rate_limit={}, credentials_path={}, ticker_header={}",
            config.worksheet_name,
            config.sheet_name,
            config.refresh_rate.as_secs(),
            config.rate_limit,
            config.credentials_path,
            config.tickers_header_name,
        );

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("worksheet_name", &self.worksheet_name),
            ("sheet_name", &self.sheet_name),
            ("credentials_path", &self.credentials_path),
            ("tickers_header_name", &self.tickers_header_name),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::Configuration(format!(
                "missing {}",
                missing.join(", ")
            )));
        }
        if self.refresh_rate.is_zero() {
            return Err(ConfigError::Configuration(
                "refresh_rate must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Requests per minute the loop would issue when each iteration makes
    /// `requests_per_iteration` remote calls.
    pub fn estimated_requests_per_minute(&self, requests_per_iteration: u32) -> f64 {
        let iterations_per_minute = 60.0 / self.refresh_rate.as_secs_f64();
        iterations_per_minute * f64::from(requests_per_iteration)
    }

    /// Whether the configured pace would exceed the advisory `rate_limit`.
    pub fn exceeds_rate_limit(&self, requests_per_iteration: u32) -> bool {
        self.estimated_requests_per_minute(requests_per_iteration) > f64::from(self.rate_limit)
    }
}
