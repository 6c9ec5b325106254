/**
 * Room Handlers
 *
 * - `GET /rooms/sync` - every room in insertion order
 * - `GET /rooms/sync/{roomId}` - one room, `404` when unknown, `400` when
 *   the id isn't a valid record id
 * - `POST /rooms/new` - store a room, `201 Created` with the stored record
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::SessionUser;
use crate::backend::store::ChatStore;
use crate::shared::{NewRoom, RoomRecord};

/// List all rooms
pub async fn list_rooms(
    State(store): State<Arc<dyn ChatStore>>,
    _user: SessionUser,
) -> Result<Json<Vec<RoomRecord>>, BackendError> {
    let rooms = store.list_rooms().await?;
    Ok(Json(rooms))
}

/// Find a room by id
pub async fn find_room(
    State(store): State<Arc<dyn ChatStore>>,
    _user: SessionUser,
    Path(room_id): Path<String>,
) -> Result<Json<RoomRecord>, BackendError> {
    let id = Uuid::parse_str(&room_id).map_err(|_| {
        BackendError::handler(StatusCode::BAD_REQUEST, format!("Invalid room id: {room_id}"))
    })?;

    store
        .find_room(id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found(format!("Room {id} not found")))
}

/// Store a new room
pub async fn create_room(
    State(store): State<Arc<dyn ChatStore>>,
    user: SessionUser,
    Json(new): Json<NewRoom>,
) -> Result<(StatusCode, Json<RoomRecord>), BackendError> {
    let record = store.create_room(new).await?;

    tracing::debug!("Room {} created by {}", record.id, user.uid);

    Ok((StatusCode::CREATED, Json(record)))
}
