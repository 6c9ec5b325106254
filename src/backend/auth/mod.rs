//! Authentication Module
//!
//! Users sign in with the third-party identity provider and exchange the
//! provider's ID token for a short-lived session token. Every record route
//! requires that session token.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── error.rs     - Authentication error type
//! ├── identity.rs  - Identity provider ID token verification
//! ├── sessions.rs  - Session token issue and validation
//! └── handlers/    - HTTP handlers
//!     ├── mod.rs          - Handler exports
//!     └── authenticate.rs - ID token exchange handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Sign in**: client signs in with the identity provider and gets an ID token
//! 2. **Authenticate**: `POST /authenticate` with the ID token → session token returned
//! 3. **Use**: record routes are called with `Authorization: Bearer <session token>`
//!
//! # Example
//!
//! ```rust,no_run
//! use chatrelay::backend::auth::authenticate;
//! use chatrelay::backend::server::state::AppState;
//! use axum::{routing::post, Router};
//!
//! # fn example() -> Router<AppState> {
//! Router::new().route("/authenticate", post(authenticate))
//! # }
//! ```

/// Authentication error type
pub mod error;

/// Identity provider verification
pub mod identity;

/// Session token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use error::AuthError;
pub use handlers::authenticate;
pub use identity::{FirebaseVerifier, IdentityVerifier, VerifiedIdentity, GOOGLE_JWKS_URL};
pub use sessions::{create_session_token, verify_session_token, SessionClaims, SESSION_TTL_SECS};
