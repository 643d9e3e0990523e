//! Remote tabular source seen by the refresh loop.
//!
//! The loop only needs two capabilities: turning a credential reference into a
//! session, and reading every row of one tab through that session. Anything that
//! implements [`SheetSource`] can drive a [`TickerRefresher`](crate::refresher::TickerRefresher),
//! which keeps the loop testable without network access.

pub mod google;

use ticker_common::FetchError;

pub use google::GoogleSheets;

/// Rows of a tab, in sheet order. Row 0 is the header row.
pub type Rows = Vec<Vec<String>>;

/// Authenticated handle to the remote source.
pub trait SheetSession {
    /// Reads every row of tab `sheet` in spreadsheet `worksheet`.
    fn read_all_rows(&self, worksheet: &str, sheet: &str) -> Result<Rows, FetchError>;
}

/// Factory for sessions.
pub trait SheetSource {
    /// Session type produced by [`SheetSource::authenticate`].
    type Session: SheetSession;

    /// Authenticates with the credential at `credentials`.
    fn authenticate(&self, credentials: &str) -> Result<Self::Session, FetchError>;

    /// Remote calls made by one authenticate + read cycle, used for the advisory
    /// rate-limit estimate.
    fn requests_per_fetch(&self) -> u32 {
        2
    }
}
