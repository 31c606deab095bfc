use std::path::{self, PathBuf};

use aoc_std::{
    errors::FetchError,
    requests::DEFAULT_BASE_URL,
    settings::{resolve_session, timeout_to_duration, Settings},
    types::{Day, LogLevel, Year},
};
use clap::Parser;

/// Fetch the Advent of Code input for a given year and day, and save it to files.
#[derive(Parser, Debug)]
#[command(name = "get-aoc-input", version, about)]
pub struct Args {
    /// Year of the Advent of Code event
    #[arg(value_parser = Year::parse)]
    pub year: Year,

    /// Day of the Advent of Code event, e.g. `day-5`
    #[arg(value_parser = Day::parse)]
    pub day: Day,

    /// Current working directory to save the input files
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Session cookie for authentication (falls back to the AOC_SESSION environment variable)
    #[arg(long)]
    pub session: Option<String>,

    /// Wait if the input is not ready (returns 404)
    #[arg(long, overrides_with = "no_wait")]
    pub wait: bool,

    /// Exit immediately if the input is not ready
    #[arg(long, overrides_with = "wait")]
    pub no_wait: bool,

    /// Timeout in seconds to wait for the input to be ready (default is infinite)
    #[arg(long, allow_negative_numbers = true)]
    pub timeout: Option<i64>,

    /// Logging level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Also fetch the problem description into README.md
    #[arg(long)]
    pub description: bool,

    #[arg(long, default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,
}

impl Args {
    /// # Errors
    ///
    /// Returns `Err` if no session is available.
    pub fn into_settings(self) -> Result<Settings, FetchError> {
        let session = resolve_session(self.session)?;

        Ok(Settings {
            base_url: self.base_url,
            year: self.year,
            day: self.day,
            cwd: self.cwd.unwrap_or_else(get_current_dir),
            session,
            wait: !self.no_wait,
            timeout: self.timeout.map(timeout_to_duration),
            log_level: self.log_level,
            description: self.description,
        })
    }
}

/// # Panics
///
/// Will panic if the current directory path is not found.
#[must_use]
pub fn get_current_dir() -> path::PathBuf {
    match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => panic!("Could not get current dir: {e}"),
    }
}
