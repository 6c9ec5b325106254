/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container handed to the
 * router. It holds:
 * - The document store behind the chat routes
 * - The identity verifier behind `/authenticate`
 * - The session signing secret
 * - The broadcast channel feeding `/realtime` subscribers
 * - The shutdown token that ends open `/realtime` streams
 *
 * # Thread Safety
 *
 * Everything is cheap to clone and safe to share:
 * - `Arc<dyn ...>` for the store and verifier
 * - `Arc<str>` for the secret
 * - `broadcast::Sender` for real-time events
 * - `CancellationToken` for shutdown
 *
 * # Example
 *
 * ```rust,no_run
 * use chatrelay::backend::server::state::AppState;
 * use chatrelay::backend::store::ChatStore;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let rooms = state.store.list_rooms().await;
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::backend::auth::IdentityVerifier;
use crate::backend::realtime::broadcast::RealtimeEventBroadcast;
use crate::backend::store::ChatStore;

/// Secret used to sign and verify session tokens
#[derive(Clone)]
pub struct SessionSecret(Arc<str>);

impl SessionSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::from(secret.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(..)")
    }
}

/// Application state shared by every handler
///
/// # Fields
///
/// * `store` - Message and room records
/// * `identity` - Verifies identity-provider ID tokens
/// * `session_secret` - HS256 secret for session tokens
/// * `realtime_broadcast` - Sender half of the channel sink, read by `/realtime`
/// * `shutdown` - Cancelled when the server shuts down; open streams end on it
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChatStore>,
    pub identity: Arc<dyn IdentityVerifier>,
    pub session_secret: SessionSecret,
    pub realtime_broadcast: RealtimeEventBroadcast,
    pub shutdown: CancellationToken,
}

/// Lets chat handlers take `State<Arc<dyn ChatStore>>` directly
impl FromRef<AppState> for Arc<dyn ChatStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<dyn IdentityVerifier> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.identity.clone()
    }
}

impl FromRef<AppState> for SessionSecret {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.session_secret.clone()
    }
}

/// Implement FromRef for RealtimeEventBroadcast
///
/// This allows the SSE handler to extract the real-time event broadcast
/// sender directly from `AppState`.
impl FromRef<AppState> for RealtimeEventBroadcast {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.realtime_broadcast.clone()
    }
}

impl FromRef<AppState> for CancellationToken {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.shutdown.clone()
    }
}
