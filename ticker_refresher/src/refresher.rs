//! The refresh loop.
//!
//! `TickerRefresher` owns the only copy of the current `TickerSet` and is its only
//! writer. Each iteration authenticates, reads the configured tab, extracts the
//! ticker column and, on success, swaps the whole set in one assignment. A failed
//! fetch is logged and leaves the previous set in place; the loop then sleeps until
//! `start + refresh_rate` and tries again. No fetch error ever ends the loop.
//!
//! Consumers read the state through [`TickerRefresher::tickers`] or receive every
//! new set over a channel from [`TickerRefresher::subscribe`].

use std::time::Instant;

use chrono::Utc;
use crossbeam_channel::{Receiver, Sender, after, never, select, unbounded};
use log::{debug, error, info};
use ticker_common::{Config, FetchError, TickerSet};

use crate::model::iteration::{IterationOutcome, RefreshIteration};
use crate::model::pacing;
use crate::source::{SheetSession, SheetSource};

/// Periodically refreshes a `TickerSet` from a [`SheetSource`].
pub struct TickerRefresher<S: SheetSource> {
    config: Config,
    source: S,
    tickers: TickerSet,
    subscribers: Vec<Sender<TickerSet>>,
    consecutive_failures: u32,
}

impl<S: SheetSource> TickerRefresher<S> {
    /// Creates a refresher with an empty `TickerSet`.
    pub fn new(config: Config, source: S) -> Self {
        Self {
            config,
            source,
            tickers: TickerSet::new(),
            subscribers: Vec::new(),
            consecutive_failures: 0,
        }
    }

    /// Tickers from the most recent successful fetch.
    pub fn tickers(&self) -> &TickerSet {
        &self.tickers
    }

    /// Failed iterations since the last success.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Registers a consumer. Every successfully fetched set is sent to the returned
    /// receiver; dropping the receiver unsubscribes on the next publish.
    pub fn subscribe(&mut self) -> Receiver<TickerSet> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Fetches the ticker column once without touching the held state.
    pub fn fetch_once(&self) -> Result<TickerSet, FetchError> {
        let session = self.source.authenticate(&self.config.credentials_path)?;
        let rows = session.read_all_rows(&self.config.worksheet_name, &self.config.sheet_name)?;
        TickerSet::from_rows(&rows, &self.config.tickers_header_name)
    }

    /// Runs one fetch, updates the state on success and logs the outcome.
    /// Does not sleep.
    pub fn step(&mut self) -> RefreshIteration {
        let started_at = Utc::now();
        let start = Instant::now();
        debug!("Fetch started at {}", started_at.format("%Y-%m-%d %H:%M:%S%.3f"));
        let result = self.fetch_once();
        let elapsed = start.elapsed();

        let outcome = match result {
            Ok(tickers) => {
                let count = tickers.len();
                self.replace(tickers);
                self.consecutive_failures = 0;
                info!(
                    "Successfully grabbed {} tickers. Iteration completed in {:.2} seconds.",
                    count,
                    elapsed.as_secs_f64()
                );
                IterationOutcome::Success { tickers: count }
            }
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                error!(
                    "Refresh failed [{}]: {} (consecutive failures: {}, keeping {} tickers)",
                    e.kind(),
                    e,
                    self.consecutive_failures,
                    self.tickers.len()
                );
                IterationOutcome::Failure(e)
            }
        };

        RefreshIteration {
            started_at,
            elapsed,
            outcome,
        }
    }

    /// Runs the loop until `stop` receives a message or its sender is dropped.
    ///
    /// The stop signal is observed while sleeping between fetches; a fetch in
    /// progress always completes first.
    pub fn run_until(&mut self, stop: &Receiver<()>) {
        info!(
            "Refreshing '{}' tab of '{}' every {}s",
            self.config.sheet_name,
            self.config.worksheet_name,
            self.config.refresh_rate.as_secs()
        );

        loop {
            let start = Instant::now();
            self.step();
            // No representable wake time: wait for the stop signal only.
            let wake = match pacing::delay_until_next(start, self.config.refresh_rate, Instant::now()) {
                Some(delay) => after(delay),
                None => never(),
            };

            select! {
                recv(stop) -> _ => break,
                recv(wake) -> _ => {}
            }
        }
        info!("Refresher stopped with {} tickers", self.tickers.len());
    }

    /// Runs the loop forever.
    pub fn run(mut self) -> ! {
        let stop = never();
        loop {
            self.run_until(&stop);
        }
    }

    fn replace(&mut self, tickers: TickerSet) {
        self.subscribers.retain(|tx| tx.send(tickers.clone()).is_ok());
        self.tickers = tickers;
    }
}
