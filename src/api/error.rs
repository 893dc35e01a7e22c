//! API client error types

use thiserror::Error;

/// Failures while fetching a record from the status API
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout
    #[error("request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    /// The server answered with a non-2xx status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Connection or protocol failure
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Body was not the expected JSON shape
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The client could not be built from the given settings
    #[error("invalid API settings: {message}")]
    Configuration { message: String },
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}

impl crate::core::error_handling::ContextualError for FetchError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, FetchError::Configuration { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            FetchError::Configuration { message } => Some(message),
            _ => None,
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
