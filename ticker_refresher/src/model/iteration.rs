//! Record of a single refresh attempt.
//!
//! Only used for pacing and log output; nothing is persisted.

use std::time::Duration;

use chrono::{DateTime, Utc};
use ticker_common::{FetchError, FetchErrorKind};

/// How a fetch attempt ended.
#[derive(Debug)]
pub enum IterationOutcome {
    /// Tickers were replaced with a freshly fetched set of this size.
    Success {
        /// Number of tickers in the new set.
        tickers: usize,
    },
    /// Tickers were left untouched.
    Failure(FetchError),
}

/// One pass through the refresh loop.
#[derive(Debug)]
pub struct RefreshIteration {
    /// Wall-clock time the fetch started.
    pub started_at: DateTime<Utc>,
    /// Time spent fetching.
    pub elapsed: Duration,
    /// Result of the fetch.
    pub outcome: IterationOutcome,
}

impl RefreshIteration {
    /// Returns `true` when the fetch succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, IterationOutcome::Success { .. })
    }

    /// Failure category, if the fetch failed.
    pub fn failure_kind(&self) -> Option<FetchErrorKind> {
        match &self.outcome {
            IterationOutcome::Success { .. } => None,
            IterationOutcome::Failure(e) => Some(e.kind()),
        }
    }
}
