/**
 * Chat Record Types
 *
 * This module defines the two record kinds kept in the document store:
 * messages and rooms. Field names on the wire follow the document shape
 * clients already consume (`_id`, `roomName`), so the Rust names are
 * renamed through serde rather than exposed as-is.
 *
 * Records are created once by the write path and never mutated afterwards.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored chat message
///
/// `room` references a [`RoomRecord`] but is not checked against the
/// rooms collection; writers are trusted to send a room that exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRecord {
    /// Document identifier
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Message body
    pub message: String,
    /// Display name of the sender
    pub name: String,
    /// Client supplied timestamp, stored verbatim
    pub timestamp: String,
    /// Room the message was posted to
    #[serde(default)]
    pub room: Option<Uuid>,
}

/// A stored chat room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomRecord {
    /// Document identifier
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Human readable room name
    #[serde(rename = "roomName")]
    pub room_name: String,
    /// Ordered message references
    #[serde(default)]
    pub messages: Vec<Uuid>,
}

/// Request body for `POST /messages/new`
///
/// Unknown fields are dropped on write; in particular a client-side
/// `received` flag never reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewMessage {
    pub message: String,
    pub name: String,
    pub timestamp: String,
    #[serde(default)]
    pub room: Option<Uuid>,
}

/// Request body for `POST /rooms/new`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewRoom {
    #[serde(rename = "roomName")]
    pub room_name: String,
    #[serde(default)]
    pub messages: Vec<Uuid>,
}

impl MessageRecord {
    /// Build a record from a write request with a freshly generated id
    pub fn from_new(new: NewMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: new.message,
            name: new.name,
            timestamp: new.timestamp,
            room: new.room,
        }
    }
}

impl RoomRecord {
    /// Build a record from a write request with a freshly generated id
    pub fn from_new(new: NewRoom) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_name: new.room_name,
            messages: new.messages,
        }
    }
}
