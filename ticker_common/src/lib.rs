//!
//! Common types shared by the ticker refresher.
//!
//! This crate aggregates:
//! - `error` — `ConfigError` for startup and `FetchError` for a single fetch attempt.
//! - `result` — handy `Result<T, ConfigError>` alias.
//! - `config` — YAML configuration loading and validation.
//! - `tickers` — the `TickerSet` value and column extraction.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod result;
pub mod tickers;

pub use config::Config;
pub use error::{ConfigError, FetchError, FetchErrorKind};
pub use result::Result;
pub use tickers::TickerSet;
