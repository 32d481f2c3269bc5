//! Domain-level errors.
//!
//! These errors represent business rule violations and malformed records.
//! They are independent of infrastructure concerns (HTTP, key-value store).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input could not be accepted (e.g. an unparsable id)
    #[error("{0}")]
    Validation(String),

    /// Entity not found
    #[error("{0}")]
    NotFound(String),

    /// Stored data does not map onto a domain entity
    #[error("decoding error: {0}")]
    Decoding(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        DomainError::NotFound(msg.into())
    }

    /// Create a decoding error
    pub fn decoding(msg: impl Into<String>) -> Self {
        DomainError::Decoding(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
