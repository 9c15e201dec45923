//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post with ID {id} not found")]
    PostNotFound { id: String },

    #[error("{0}")]
    InvalidData(String),

    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Flat-file persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::Internal(err.to_string())
    }
}
