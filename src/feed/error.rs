use reqwest::StatusCode;
use thiserror::Error;

/// Reasons a feed lookup produced no events
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("No such calendar day: month {month}, day {day}")]
    InvalidDate { month: u32, day: u32 },

    #[error("Feed request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Feed returned HTTP {0}")]
    BadResponse(StatusCode),

    #[error("Malformed feed payload: {0}")]
    MalformedPayload(String),
}

impl LookupError {
    /// True when the request hit the configured timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, LookupError::Network(e) if e.is_timeout())
    }
}

pub type LookupResult<T> = Result<T, LookupError>;
