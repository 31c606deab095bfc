use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use reqwest::StatusCode;
use tracing::level_filters::LevelFilter;

use crate::errors::FetchError;

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("year pattern compiles"));
static DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^day-([0-9]+)$").expect("day pattern compiles"));

/// Event year, always four ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Year(String);

impl Year {
    /// # Errors
    ///
    /// Returns `Err` if the value is not a 4-digit number.
    pub fn parse(value: &str) -> Result<Year, FetchError> {
        if !YEAR_RE.is_match(value) {
            return Err(FetchError::InvalidYear {
                value: value.to_string(),
            });
        }
        Ok(Year(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Year {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Year::parse(s)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Puzzle day in its directory form, `day-<n>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    label: String,
    number: u32,
}

impl Day {
    /// # Errors
    ///
    /// Returns `Err` if the value is not `day-` followed by a number.
    pub fn parse(value: &str) -> Result<Day, FetchError> {
        let invalid = || FetchError::InvalidDay {
            value: value.to_string(),
        };

        let Some(caps) = DAY_RE.captures(value) else { return Err(invalid()) };
        let number = caps[1].parse::<u32>().map_err(|_| invalid())?;

        Ok(Day {
            label: value.to_string(),
            number,
        })
    }

    /// Directory name, e.g. `day-5`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Day number as used in the event's URLs.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }
}

impl FromStr for Day {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::parse(s)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    // tracing has no level above ERROR
    #[must_use]
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            other => Err(format!(
                "unknown log level '{other}'. expected one of DEBUG, INFO, WARNING, ERROR, CRITICAL"
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single request whose transport succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub body: String,
}

impl FetchResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> FetchResponse {
        FetchResponse {
            status,
            body: body.into(),
        }
    }
}
