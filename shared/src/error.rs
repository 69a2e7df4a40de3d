//! Model error types
//!
//! Absence (no menu, no cart, no matching line) is `Option`/zero, never an
//! error, and constraint violations are rejected at the mutation boundary
//! without erroring. What remains is the small set of genuinely invalid
//! states a caller can request.

use thiserror::Error;

/// Model error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A choice was referenced that the item does not declare
    #[error("unknown choice '{name}' in category '{category}'")]
    UnknownChoice { name: String, category: String },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;
