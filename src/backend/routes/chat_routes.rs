/**
 * Chat Route Configuration
 *
 * Message and room record routes. Every route here goes through the
 * session middleware, so handlers can rely on a `SessionUser`.
 *
 * - `GET /messages/sync` - All messages
 * - `POST /messages/new` - Store a message
 * - `GET /rooms/sync` - All rooms
 * - `GET /rooms/sync/{roomId}` - One room
 * - `POST /rooms/new` - Store a room
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::chat::handlers::{create_message, create_room, find_room, list_messages, list_rooms};
use crate::backend::middleware::auth::require_session;
use crate::backend::server::state::AppState;

/// Configure chat routes behind the session middleware
pub fn configure_chat_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/messages/sync", get(list_messages))
        .route("/messages/new", post(create_message))
        .route("/rooms/sync", get(list_rooms))
        .route("/rooms/sync/{room_id}", get(find_room))
        .route("/rooms/new", post(create_room))
        .route_layer(middleware::from_fn_with_state(app_state, require_session));

    router.merge(protected)
}
