// src/error.rs
// =============================================================================
// Error types shared by the matcher, the fetcher and the coordinator.
//
// Two enums:
// - TallyError: everything that can go wrong for one run or one job
// - FetchError: what went wrong while talking to a server
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error from attributes
// - #[source]: chains the underlying cause so callers can walk it
// =============================================================================

use std::time::Duration;
use thiserror::Error;

/// Errors produced while validating input or processing a job.
#[derive(Debug, Error)]
pub enum TallyError {
    /// Missing word, missing URLs or an unusable setting. Fatal.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A positional argument is not a syntactically valid URL.
    #[error("cannot parse URL {input:?}: {source}")]
    UrlParse {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL has no explicit protocol (e.g. "example.com").
    #[error("please specify protocol for {input}")]
    MissingScheme { input: String },

    /// The worker could not fetch or read the response.
    #[error("{url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// The job queue was closed before every job was submitted.
    #[error("job queue closed while submitting")]
    QueueClosed,

    /// Every outcome sender was dropped before the drain finished.
    #[error("outcome channel closed after {drained} of {expected} outcomes")]
    OutcomesLost { drained: usize, expected: usize },
}

/// Failure modes of a single GET request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    /// Sorts a reqwest error into one of our categories.
    pub fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            FetchError::Timeout(timeout)
        } else if error.is_redirect() {
            FetchError::TooManyRedirects
        } else if let Some(status) = error.status() {
            FetchError::Status(status.as_u16())
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}
