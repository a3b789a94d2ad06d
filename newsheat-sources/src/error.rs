//! Error types for the source layer

use thiserror::Error;

/// Errors that can occur while fetching or parsing a source
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Server answered with a non-success status
    #[error("HTTP error (status {status}) for {url}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Failed to parse a feed, API response or page
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Work did not finish before its deadline
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SourceError {
    /// Statuses that will not change on retry
    pub fn is_permanent(&self) -> bool {
        matches!(self, SourceError::HttpStatus { status: 401 | 403 | 404, .. })
    }
}
