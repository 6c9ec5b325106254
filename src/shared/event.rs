/**
 * Change and Real-time Event Types
 *
 * This module defines the two event shapes that flow through the system:
 *
 * - `ChangeEvent` - one entry of a collection's change feed, as produced by
 *   the document store
 * - `RealtimeEvent` - one broadcast notification delivered to connected
 *   clients (channel, event name and payload)
 */
use serde::{Deserialize, Serialize};
use std::fmt;

/// Watched record collections
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Chat messages
    Messages,
    /// Chat rooms
    Rooms,
}

impl Collection {
    /// All collections with a change feed
    pub const ALL: [Collection; 2] = [Collection::Messages, Collection::Rooms];

    /// Collection name as used by the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Messages => "messages",
            Collection::Rooms => "rooms",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of mutation reported by a change event
///
/// Kinds the store may add later are kept verbatim in `Other` so they can
/// still be logged by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationType {
    Insert,
    Update,
    Replace,
    Delete,
    Truncate,
    Other(String),
}

impl OperationType {
    pub fn as_str(&self) -> &str {
        match self {
            OperationType::Insert => "insert",
            OperationType::Update => "update",
            OperationType::Replace => "replace",
            OperationType::Delete => "delete",
            OperationType::Truncate => "truncate",
            OperationType::Other(kind) => kind.as_str(),
        }
    }
}

impl From<String> for OperationType {
    fn from(kind: String) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "insert" => OperationType::Insert,
            "update" => OperationType::Update,
            "replace" => OperationType::Replace,
            "delete" => OperationType::Delete,
            "truncate" => OperationType::Truncate,
            _ => OperationType::Other(kind),
        }
    }
}

impl From<OperationType> for String {
    fn from(kind: OperationType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a collection's change feed
///
/// For `insert` events `full_document` carries the newly created record.
/// It is kept as a raw JSON object: consumers copy fields out of it without
/// checking them against the stored schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    #[serde(rename = "operationType")]
    pub operation_type: OperationType,
    #[serde(
        rename = "fullDocument",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub full_document: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(
        rename = "documentKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub document_key: Option<serde_json::Value>,
}

impl ChangeEvent {
    /// Insert event carrying the new document
    ///
    /// Non-object values produce an insert without a document.
    pub fn insert(document: serde_json::Value) -> Self {
        let full_document = match document {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        };
        Self {
            operation_type: OperationType::Insert,
            full_document,
            document_key: None,
        }
    }

    /// Non-insert event of the given kind
    pub fn of_kind(kind: OperationType) -> Self {
        Self {
            operation_type: kind,
            full_document: None,
            document_key: None,
        }
    }

    pub fn with_document_key(mut self, key: serde_json::Value) -> Self {
        self.document_key = Some(key);
        self
    }
}

/// Broadcast notification delivered to connected clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealtimeEvent {
    /// Channel the event was published on (e.g. `message`)
    pub channel: String,
    /// Event name within the channel (e.g. `inserted`)
    pub event: String,
    /// Event payload
    pub payload: serde_json::Value,
    /// RFC3339 time the event was published
    pub timestamp: String,
}

impl RealtimeEvent {
    pub fn new(
        channel: impl Into<String>,
        event: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            channel: channel.into(),
            event: event.into(),
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// SSE event name: `{channel}:{event}`
    pub fn name(&self) -> String {
        format!("{}:{}", self.channel, self.event)
    }
}
