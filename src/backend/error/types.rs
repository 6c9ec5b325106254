/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers. It wraps the
 * errors of the layers handlers call into and knows the HTTP status each
 * one maps to.
 *
 * # Error Categories
 *
 * - `HandlerError` - bad input detected by the handler itself
 * - `Auth` - missing or rejected credentials
 * - `Store` - document store failures
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::AuthError;
use crate::backend::store::StoreError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use chatrelay::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid room id");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g. malformed path parameter, unknown record)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Authentication error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Document store error
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a 404 for a missing record
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Auth` - Depends on the auth error (401, 503 or 500)
    /// - `Store` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Auth(err) => err.status_code(),
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Auth(err) => err.to_string(),
            Self::Store(err) => err.to_string(),
        }
    }
}
