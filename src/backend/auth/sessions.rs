/**
 * Session Tokens
 *
 * Short-lived HS256 JWTs issued after the identity provider has vouched for
 * a user. Claims carry only the provider's user id; tokens expire one hour
 * after issue.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Session lifetime in seconds
pub const SESSION_TTL_SECS: u64 = 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identity-provider user id
    pub uid: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Create a session token for `uid`
pub fn create_session_token(uid: &str, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    create_session_token_at(uid, secret, unix_now())
}

/// Create a session token as if issued at `issued_at`
pub fn create_session_token_at(
    uid: &str,
    secret: &str,
    issued_at: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = SessionClaims {
        uid: uid.to_string(),
        iat: issued_at,
        exp: issued_at + SESSION_TTL_SECS,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a session token
pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<SessionClaims>(token, &key, &validation)?;
    Ok(token_data.claims)
}
