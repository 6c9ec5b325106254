/**
 * Message Handlers
 *
 * `GET /messages/sync` returns every stored message in insertion order.
 * `POST /messages/new` stores a message and answers `201 Created` with the
 * stored record, including its generated `_id`.
 *
 * Both routes sit behind the session middleware. Storing a message is what
 * eventually produces the `message`/`inserted` broadcast; the handler itself
 * never publishes.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::SessionUser;
use crate::backend::store::ChatStore;
use crate::shared::{MessageRecord, NewMessage};

/// List all messages
pub async fn list_messages(
    State(store): State<Arc<dyn ChatStore>>,
    _user: SessionUser,
) -> Result<Json<Vec<MessageRecord>>, BackendError> {
    let messages = store.list_messages().await?;
    Ok(Json(messages))
}

/// Store a new message
pub async fn create_message(
    State(store): State<Arc<dyn ChatStore>>,
    user: SessionUser,
    Json(new): Json<NewMessage>,
) -> Result<(StatusCode, Json<MessageRecord>), BackendError> {
    let record = store.create_message(new).await?;

    tracing::debug!("Message {} stored by {}", record.id, user.uid);

    Ok((StatusCode::CREATED, Json(record)))
}
