/**
 * Authenticate Handler
 *
 * This module implements `POST /authenticate`, which exchanges an identity
 * provider ID token for a session token.
 *
 * # Authentication Process
 *
 * 1. Read the ID token from the `Authorization` header (raw or `Bearer <token>`)
 * 2. Verify it with the identity provider
 * 3. Issue a one-hour session token carrying the provider's user id
 * 4. Return the token as plain text
 */

use axum::{extract::State, http::HeaderMap};

use crate::backend::auth::error::AuthError;
use crate::backend::auth::sessions::create_session_token;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::credential_from_headers;
use crate::backend::server::state::AppState;

/// Authenticate handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the header is missing or the ID token is rejected
/// * `503 Service Unavailable` - If the provider's signing keys can't be fetched
/// * `500 Internal Server Error` - If the session token can't be signed
///
/// # Example Request
///
/// ```http
/// POST /authenticate HTTP/1.1
/// Authorization: eyJhbGciOiJSUzI1NiIsImtpZCI6Ij...
/// ```
///
/// The response body is the session token.
pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<String, BackendError> {
    let id_token = credential_from_headers(&headers)?;

    let identity = state.identity.verify(id_token).await?;

    let token = create_session_token(&identity.uid, state.session_secret.as_str())
        .map_err(|e| AuthError::Issue(e.to_string()))?;

    tracing::info!("Session issued for {}", identity.uid);

    Ok(token)
}
