//! Error types for newsheat

use thiserror::Error;

/// Workspace-wide error type
#[derive(Error, Debug)]
pub enum NewsheatError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NewsheatError {
    pub fn parse(msg: impl Into<String>) -> Self {
        NewsheatError::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        NewsheatError::Config(msg.into())
    }
}

/// Result type alias for newsheat operations
pub type NewsheatResult<T> = Result<T, NewsheatError>;
