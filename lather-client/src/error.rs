//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// A cart erase is already staged for this session
    #[error("an erase is already staged")]
    EraseAlreadyStaged,

    /// Backing store failure (menu source or cart store)
    #[error("store error: {0}")]
    Store(String),

    /// Model-level rejection
    #[error(transparent)]
    Model(#[from] shared::error::ModelError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
