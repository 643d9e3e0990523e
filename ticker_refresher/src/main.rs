//! Ticker refresher binary.
//!
//! Loads the YAML configuration, then keeps the configured spreadsheet column in
//! memory by re-reading it every `refresh_rate` seconds:
//!
//! - a broken configuration is logged and ends the process with a non-zero status;
//! - fetch failures are logged and never end the loop;
//! - Ctrl+C stops the loop between fetches.
//!
//! Usage example (CLI):
//! ```bash
//! ticker_refresher --config dev/config.yaml
//! ticker_refresher --config dev/config.yaml --once
//! ```
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use crossbeam_channel::bounded;
use log::{error, info, warn};
use ticker_common::Config;
use ticker_refresher::source::{GoogleSheets, SheetSource};
use ticker_refresher::{RefresherError, TickerRefresher};

fn main() -> Result<(), RefresherError> {
    init_logger();
    run(Args::parse()).inspect_err(|e| error!("{}", e))
}

/// Startup and the refresh loop. Every error returned here is fatal and logged by
/// `main`.
fn run(args: Args) -> Result<(), RefresherError> {
    let config = Config::load(&args.config)?;
    let source = GoogleSheets::new()?;

    if config.exceeds_rate_limit(source.requests_per_fetch()) {
        warn!(
            "refresh_rate={}s issues about {:.0} requests/minute, above rate_limit={}",
            config.refresh_rate.as_secs(),
            config.estimated_requests_per_minute(source.requests_per_fetch()),
            config.rate_limit
        );
    }

    let mut refresher = TickerRefresher::new(config, source);

    if args.once {
        let tickers = refresher.fetch_once()?;
        println!("{}", serde_json::to_string(&tickers)?);
        return Ok(());
    }

    let (stop_tx, stop_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Stopping ticker refresher...");
        let _ = stop_tx.try_send(());
    })?;

    refresher.run_until(&stop_rx);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
