//! Diagnostics records and pacing for the refresh loop.
//!
//! - `iteration` — `RefreshIteration`, the ephemeral record of one fetch attempt.
//! - `pacing` — computes how long to sleep before the next fetch starts.

pub mod iteration;
pub mod pacing;
