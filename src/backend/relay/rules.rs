/**
 * Relay Rules
 *
 * A rule says which collection it watches, where inserts are published and
 * which fields of the new document make up the broadcast payload.
 *
 * Projection is a plain field copy: each listed field is copied when the
 * document has it and left out when it doesn't. Values are never checked
 * against the stored schema, so a field like `received` is forwarded
 * whenever a document happens to carry it.
 */

use serde_json::{Map, Value};

use crate::shared::Collection;

/// Forwarding rule for one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayRule {
    pub collection: Collection,
    pub channel: &'static str,
    pub event: &'static str,
    pub fields: &'static [&'static str],
}

/// New messages: `message` / `inserted`
pub const MESSAGE_INSERTED: RelayRule = RelayRule {
    collection: Collection::Messages,
    channel: "message",
    event: "inserted",
    fields: &["name", "message", "timestamp", "received"],
};

/// New rooms: `room` / `inserted`
pub const ROOM_INSERTED: RelayRule = RelayRule {
    collection: Collection::Rooms,
    channel: "room",
    event: "inserted",
    fields: &["_id", "roomName"],
};

/// Rules applied when the relay starts
pub const DEFAULT_RULES: [RelayRule; 2] = [MESSAGE_INSERTED, ROOM_INSERTED];

impl RelayRule {
    /// Copy this rule's fields out of `document`
    pub fn project(&self, document: &Map<String, Value>) -> Value {
        let projection = self
            .fields
            .iter()
            .filter_map(|field| {
                document
                    .get(*field)
                    .map(|value| (field.to_string(), value.clone()))
            })
            .collect::<Map<String, Value>>();
        Value::Object(projection)
    }
}
