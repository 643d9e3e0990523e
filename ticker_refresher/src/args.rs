//! Command-line arguments for the ticker refresher.
use clap::Parser;
use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file.
    #[clap(long, default_value = "dev/config.yaml")]
    pub config: PathBuf,

    /// Fetch once, print the tickers as JSON and exit.
    #[clap(long)]
    pub once: bool,
}
