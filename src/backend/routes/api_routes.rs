/**
 * API Route Handlers
 *
 * Public routes that need no session:
 *
 * - `GET /` - Welcome text
 * - `POST /authenticate` - Identity-provider ID token in, session token out
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::authenticate;
use crate::backend::server::state::AppState;

/// Body of `GET /`
pub const WELCOME_MESSAGE: &str = "Welcome to the chat relay backend!";

async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(welcome))
        .route("/authenticate", post(authenticate))
}
