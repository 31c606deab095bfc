use reqwest::{
    blocking::Client,
    header::{COOKIE, USER_AGENT},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::{
    errors::FetchError,
    types::{Day, FetchResponse, Year},
};

pub const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

const TOOL_USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (get-aoc-input)"
);

/// One authenticated GET. Implemented by [`PuzzleRequestBuilder`] for the
/// real service and by scripted fakes in tests.
pub trait Fetch {
    /// # Errors
    ///
    /// Returns `Err` only when no HTTP response was received at all.
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

#[derive(Debug)]
pub struct PuzzleRequestBuilder {
    pub client: Client,
    pub api: String,
    session: SecretString,
}

impl PuzzleRequestBuilder {
    /// # Errors
    ///
    /// Returns `Err` if the `api` or `session` is empty.
    pub fn new(api: String, session: &SecretString) -> Result<PuzzleRequestBuilder, FetchError> {
        if api.is_empty() {
            return Err(FetchError::ApiNotFound {});
        }
        if session.expose_secret().is_empty() {
            return Err(FetchError::SessionNotFound {});
        }

        let api = api.trim_end_matches('/').to_string();

        Ok(PuzzleRequestBuilder {
            client: Client::new(),
            api,
            session: SecretString::from(session.expose_secret().to_string()),
        })
    }

    #[must_use]
    pub fn input_url(&self, year: &Year, day: &Day) -> String {
        format!("{}/input", self.description_url(year, day))
    }

    #[must_use]
    pub fn description_url(&self, year: &Year, day: &Day) -> String {
        format!("{}/{}/day/{}", self.api, year, day.number())
    }
}

impl Fetch for PuzzleRequestBuilder {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        debug!("Sending to `{url}`");

        let res = self
            .client
            .get(url)
            .header(COOKIE, format!("session={}", self.session.expose_secret()))
            .header(USER_AGENT, TOOL_USER_AGENT)
            .send()
            .map_err(|err| FetchError::Transport {
                url: url.to_string(),
                reason: err.to_string(),
            })?;

        let status = res.status();
        let body = res.text().map_err(|err| FetchError::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        })?;

        Ok(FetchResponse { status, body })
    }
}
