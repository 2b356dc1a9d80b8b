//! Error taxonomy for the engine, its configuration and its catalog.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The caller has exhausted its quota for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rate limit of {limit} requests exceeded, window resets in {retry_after:?}")]
pub struct RateLimitExceeded {
    pub limit: u32,
    /// Time left until the caller's window rolls over.
    pub retry_after: Duration,
}

/// Failure of a single search request.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    RateLimited(#[from] RateLimitExceeded),

    /// The request body did not have the expected shape.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Unexpected failure while matching or ranking. The message is for logs
    /// only and must never reach the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SearchError {
    pub fn internal(message: impl Into<String>) -> Self {
        SearchError::Internal(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        SearchError::MalformedRequest(message.into())
    }
}

impl From<regex::Error> for SearchError {
    fn from(err: regex::Error) -> Self {
        SearchError::Internal(format!("token pattern: {err}"))
    }
}

/// Failure to load or validate [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failure to build a [`Catalog`](crate::Catalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog contains no entries")]
    Empty,
}
