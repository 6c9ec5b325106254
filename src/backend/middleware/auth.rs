/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require a
 * session. It extracts and verifies the session token from the
 * Authorization header and provides the user id to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::error::AuthError;
use crate::backend::auth::sessions::verify_session_token;
use crate::backend::error::BackendError;
use crate::backend::server::state::SessionSecret;

/// Authenticated user data extracted from the session token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    /// Identity-provider user id
    pub uid: String,
}

/// Read the credential from the Authorization header
///
/// Accepts both `Bearer <token>` and a bare token.
pub fn credential_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?
        .trim();

    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => value,
    };

    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    Ok(token)
}

/// Session middleware
///
/// This middleware:
/// 1. Extracts the session token from the Authorization header
/// 2. Verifies it against the session secret
/// 3. Attaches a `SessionUser` to the request extensions
///
/// Returns 401 Unauthorized if the token is missing, invalid or expired.
pub async fn require_session(
    State(secret): State<SessionSecret>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = credential_from_headers(request.headers())?;

    let claims = verify_session_token(token, secret.as_str()).map_err(|e| {
        tracing::warn!("Invalid session token: {}", e);
        AuthError::InvalidSession(e.to_string())
    })?;

    request
        .extensions_mut()
        .insert(SessionUser { uid: claims.uid });

    Ok(next.run(request).await)
}

/// Axum extractor for the session user
///
/// Only succeeds on routes behind `require_session`.
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<SessionUser>().cloned().ok_or_else(|| {
            tracing::warn!("SessionUser not found in request extensions");
            AuthError::MissingCredentials.into()
        })
    }
}
