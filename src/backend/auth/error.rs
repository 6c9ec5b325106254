/**
 * Authentication Errors
 *
 * Shared by the identity verifier, the `/authenticate` handler and the
 * session middleware. Each variant maps to one HTTP status.
 */

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No credentials were sent
    #[error("Missing Authorization header")]
    MissingCredentials,

    /// The identity provider's token was rejected
    #[error("Invalid ID token: {0}")]
    InvalidIdToken(String),

    /// The session token was missing, expired or tampered with
    #[error("Invalid session token: {0}")]
    InvalidSession(String),

    /// Signing keys could not be fetched from the identity provider
    #[error("Failed to fetch identity provider keys: {0}")]
    KeyFetch(String),

    /// A session token could not be issued
    #[error("Failed to issue session token: {0}")]
    Issue(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials
            | AuthError::InvalidIdToken(_)
            | AuthError::InvalidSession(_) => StatusCode::UNAUTHORIZED,
            AuthError::KeyFetch(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Issue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
