/**
 * Identity Provider Verification
 *
 * Verifies ID tokens issued by the third-party identity provider before a
 * session token is handed out.
 *
 * # Firebase ID Tokens
 *
 * Tokens are RS256 JWTs. A token is accepted when:
 * - its header names a `kid` present in the provider's published JWK set
 * - the signature verifies against that key
 * - `aud` is the project id and `iss` is `https://securetoken.google.com/<project>`
 * - it has not expired and `sub` (the user id) is non-empty
 *
 * The JWK set is cached for an hour and refetched early when a token names
 * a key the cache doesn't know, which is how key rotation shows up.
 */

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::{Jwk, JwkSet}, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::error::AuthError;

/// Google's published signing keys for Firebase ID tokens
pub const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const KEY_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// A user the identity provider vouched for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: String,
}

/// Verifies identity-provider ID tokens
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, AuthError>;
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

/// Firebase ID token verifier
pub struct FirebaseVerifier {
    client: reqwest::Client,
    project_id: String,
    jwks_url: String,
    cache: RwLock<Option<CachedKeys>>,
}

impl FirebaseVerifier {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self::with_jwks_url(project_id, GOOGLE_JWKS_URL)
    }

    pub fn with_jwks_url(project_id: impl Into<String>, jwks_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            project_id: project_id.into(),
            jwks_url: jwks_url.into(),
            cache: RwLock::new(None),
        }
    }

    fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        tracing::debug!("Fetching identity provider keys from {}", self.jwks_url);

        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::KeyFetch(format!(
                "key endpoint answered {}",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))
    }

    /// Find the key for `kid`, refreshing the cache when it is stale or
    /// doesn't know the key
    async fn key_for(&self, kid: &str) -> Result<Jwk, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < KEY_CACHE_TTL {
                    if let Some(jwk) = cached.keys.find(kid) {
                        return Ok(jwk.clone());
                    }
                }
            }
        }

        let keys = self.fetch_keys().await?;
        let jwk = keys.find(kid).cloned();
        *self.cache.write().await = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });

        jwk.ok_or_else(|| AuthError::InvalidIdToken(format!("unknown key id {kid}")))
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, AuthError> {
        let header = decode_header(id_token)
            .map_err(|e| AuthError::InvalidIdToken(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidIdToken(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidIdToken("missing key id".to_string()))?;

        let jwk = self.key_for(&kid).await?;
        let key = DecodingKey::from_jwk(&jwk)
            .map_err(|e| AuthError::InvalidIdToken(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.project_id.as_str()]);
        validation.set_issuer(&[self.issuer()]);

        let token_data = decode::<IdTokenClaims>(id_token, &key, &validation)
            .map_err(|e| AuthError::InvalidIdToken(e.to_string()))?;

        if token_data.claims.sub.is_empty() {
            return Err(AuthError::InvalidIdToken("empty subject".to_string()));
        }

        Ok(VerifiedIdentity {
            uid: token_data.claims.sub,
        })
    }
}
