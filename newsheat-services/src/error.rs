//! Service-layer errors

use newsheat_sources::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
