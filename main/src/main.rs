use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

// Import aoc std library methods
use aoc_std::errors::FetchError;
use aoc_std::polling::SystemClock;
use aoc_std::puzzle::fetch_puzzle;
use aoc_std::requests::PuzzleRequestBuilder;
use aoc_std::telemetry::{get_subscriber, init_subscriber};
use aoc_std::types::LogLevel;

// base helpers for this binary
pub mod base;
use base::Args;

// get-aoc-input 2023 day-5 --timeout 600
// cargo run --package aoc-bin --bin get-aoc-input -- 2023 day-5
fn main() -> anyhow::Result<ExitCode> {
    let settings = match Args::parse().into_settings() {
        Ok(settings) => settings,
        Err(err) => {
            // no settings to configure logging from, report at the default level
            let _guard = init_subscriber(get_subscriber(LogLevel::default(), std::io::stderr));
            error!("{err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let _guard = init_subscriber(get_subscriber(settings.log_level, std::io::stderr));
    debug!(?settings, "resolved settings");

    let rb = PuzzleRequestBuilder::new(settings.base_url.clone(), &settings.session)?;

    match fetch_puzzle(&settings, &rb, &SystemClock) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(FetchError::NotReady {} | FetchError::TimedOut {}) => Ok(ExitCode::FAILURE),
        Err(err) => Err(err.into()),
    }
}
