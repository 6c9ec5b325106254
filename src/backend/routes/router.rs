/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes (welcome, authentication)
 * 2. Chat routes (message and room records, session required)
 * 3. Real-time SSE route
 * 4. Fallback handler (404)
 *
 * CORS is permissive on every route and each request is traced.
 */

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::not_found;
use crate::backend::realtime::subscription::handle_realtime_subscription;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// ## API Routes
///
/// - `GET /` - Welcome text
/// - `POST /authenticate` - Exchange an ID token for a session token
///
/// ## Chat Routes
///
/// - `GET /messages/sync`, `POST /messages/new`
/// - `GET /rooms/sync`, `GET /rooms/sync/{roomId}`, `POST /rooms/new`
///
/// ## Real-time
///
/// - `GET /realtime` - Server-Sent Events of relayed broadcasts
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_api_routes(router);

    let router = configure_chat_routes(router, app_state.clone());

    let router = router.route("/realtime", get(handle_realtime_subscription));

    router
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
