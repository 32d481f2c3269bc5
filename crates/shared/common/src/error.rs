//! Unified error handling for the HTTP layer and the key-value store.
//!
//! Provides a single error type that converts into an Axum HTTP response.
//! Client errors (400/404) render as `{"error": "<message>"}`; every 500
//! renders with an empty body and the detail goes to the log instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, MSG_NO_USER_FOUND};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the key-value store gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key holds a value of another representation (e.g. a scalar where
    /// a hash was expected)
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,

    /// The store could not be reached or the connection broke
    #[error("store connection error: {0}")]
    Connection(String),

    /// The store rejected or failed a command
    #[error("store command error: {0}")]
    Command(String),
}

impl StoreError {
    pub fn connection(msg: impl Into<String>) -> Self {
        StoreError::Connection(msg.into())
    }

    pub fn command(msg: impl Into<String>) -> Self {
        StoreError::Command(msg.into())
    }
}

#[cfg(feature = "cache")]
impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.code() == Some("WRONGTYPE") || err.kind() == redis::ErrorKind::TypeError {
            StoreError::WrongType
        } else if err.is_io_error()
            || err.is_connection_dropped()
            || err.is_connection_refusal()
            || err.is_timeout()
        {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Command(err.to_string())
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed request body or id
    #[error("{0}")]
    BadRequest(String),

    /// Entity absence
    #[error("{0}")]
    NotFound(String),

    /// Connectivity, wrong-representation or command failure from the store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored data that fails to map onto a domain entity
    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Decoding(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether this is the "no such user" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                (status, Json(ErrorResponse { error: msg })).into_response()
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                status.into_response()
            }
            AppError::Decoding(msg) => {
                tracing::error!("Decoding error: {}", msg);
                status.into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                status.into_response()
            }
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::Decoding(msg) => AppError::Decoding(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn no_user_found() -> Self {
        AppError::NotFound(MSG_NO_USER_FOUND.to_string())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
