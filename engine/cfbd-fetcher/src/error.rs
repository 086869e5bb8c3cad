//! Error types for the CFBD fetcher

use thiserror::Error;

/// Result type alias for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while reading from the sports-data API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("{endpoint} request failed with status: {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// The response body could not be decoded
    #[error("Failed to parse {endpoint} response: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The rankings response did not contain the requested poll
    #[error("Poll not found in rankings response: {0}")]
    PollNotFound(String),
}

impl FetchError {
    /// Create a new poll-not-found error
    pub fn poll_not_found(poll: impl Into<String>) -> Self {
        Self::PollNotFound(poll.into())
    }
}
