use std::{path::PathBuf, time::Duration};

use secrecy::SecretString;

use crate::{
    errors::FetchError,
    types::{Day, LogLevel, Year},
};

pub const SESSION_ENV: &str = "AOC_SESSION";

/// Everything one invocation needs, resolved up front.
#[derive(Debug)]
pub struct Settings {
    pub base_url: String,
    pub year: Year,
    pub day: Day,
    pub cwd: PathBuf,
    pub session: SecretString,
    pub wait: bool,
    pub timeout: Option<Duration>,
    pub log_level: LogLevel,
    pub description: bool,
}

/// Picks the session from the command line, then from `AOC_SESSION`.
///
/// # Errors
///
/// Returns `Err` if neither source provides a non-empty session.
pub fn resolve_session(cli: Option<String>) -> Result<SecretString, FetchError> {
    resolve_session_from(cli, std::env::var(SESSION_ENV).ok())
}

fn resolve_session_from(
    cli: Option<String>,
    env: Option<String>,
) -> Result<SecretString, FetchError> {
    cli.into_iter()
        .chain(env)
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .map(SecretString::from)
        .ok_or(FetchError::SessionNotFound {})
}

/// Zero and negative timeouts mean the deadline has already passed.
#[must_use]
pub fn timeout_to_duration(seconds: i64) -> Duration {
    Duration::from_secs(u64::try_from(seconds).unwrap_or(0))
}
