use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("year must be a 4-digit number. got: {value}")]
    InvalidYear { value: String },

    #[error("day must be in the format 'day-x' where x is a number. got: {value}")]
    InvalidDay { value: String },

    #[error("session cookie must be provided either as an argument or through the AOC_SESSION environment variable")]
    SessionNotFound {},

    #[error("API URL is not found.")]
    ApiNotFound {},

    #[error("request to {url} failed with status: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("request to {url} failed. reason: {reason}")]
    Transport { url: String, reason: String },

    #[error("no problem description was found in the page.")]
    DescriptionNotFound {},

    #[error("writing {path} failed. reason: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("the resource is not ready yet (404) and waiting is disabled.")]
    NotReady {},

    #[error("timeout exceeded while waiting for the resource.")]
    TimedOut {},
}
