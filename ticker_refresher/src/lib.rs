//! Periodic ticker refresher.
//!
//! Pulls a ticker column from a Google spreadsheet on a fixed period and keeps the
//! latest good copy in memory:
//!
//! - `source` — the `SheetSource`/`SheetSession` capability pair and the Google
//!   Sheets implementation.
//! - `refresher` — `TickerRefresher`, the fetch/sleep loop.
//! - `model` — per-iteration diagnostics and pacing.
//! - `error` — `RefresherError`, returned from `main`.
#![warn(missing_docs)]
pub mod error;
pub mod model;
pub mod refresher;
pub mod source;

pub use error::RefresherError;
pub use refresher::TickerRefresher;
