/**
 * In-Memory Document Store
 *
 * Keeps messages and rooms in process memory and exposes the same change
 * feed contract as the PostgreSQL adapter. Every write publishes its insert
 * event on a per-collection `tokio::sync::broadcast` channel while the write
 * lock is still held, so feed order always matches write order.
 *
 * Nothing survives a restart; the server falls back to this store when
 * `DATABASE_URL` is not configured.
 */

use async_trait::async_trait;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use uuid::Uuid;

use super::{ChangeFeed, ChangeStream, ChatStore, StoreError};
use crate::shared::{
    ChangeEvent, Collection, MessageRecord, NewMessage, NewRoom, RoomRecord,
};

/// Default per-collection feed buffer
pub const DEFAULT_FEED_CAPACITY: usize = 1024;

#[derive(Default)]
struct Records {
    messages: Vec<MessageRecord>,
    rooms: Vec<RoomRecord>,
}

/// In-process store and change feed
#[derive(Clone)]
pub struct MemoryStore {
    records: Arc<RwLock<Records>>,
    messages_feed: broadcast::Sender<ChangeEvent>,
    rooms_feed: broadcast::Sender<ChangeEvent>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_feed_capacity(DEFAULT_FEED_CAPACITY)
    }

    /// Create a store whose feeds buffer at most `capacity` unread events
    /// per subscriber before the subscriber is reported as lagging
    pub fn with_feed_capacity(capacity: usize) -> Self {
        let (messages_feed, _) = broadcast::channel(capacity);
        let (rooms_feed, _) = broadcast::channel(capacity);
        Self {
            records: Arc::new(RwLock::new(Records::default())),
            messages_feed,
            rooms_feed,
        }
    }

    fn feed(&self, collection: Collection) -> &broadcast::Sender<ChangeEvent> {
        match collection {
            Collection::Messages => &self.messages_feed,
            Collection::Rooms => &self.rooms_feed,
        }
    }

    fn publish_insert<T: serde::Serialize>(
        &self,
        collection: Collection,
        record: &T,
    ) -> Result<(), StoreError> {
        let document = serde_json::to_value(record)
            .map_err(|source| StoreError::MalformedEvent { collection, source })?;
        let event = ChangeEvent::insert(document);

        // No subscribers is fine; the record is stored either way
        if self.feed(collection).send(event).is_err() {
            tracing::trace!(%collection, "No change feed subscribers");
        }
        Ok(())
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn list_messages(&self) -> Result<Vec<MessageRecord>, StoreError> {
        Ok(self.records.read().await.messages.clone())
    }

    async fn create_message(&self, new: NewMessage) -> Result<MessageRecord, StoreError> {
        let record = MessageRecord::from_new(new);
        let mut records = self.records.write().await;
        records.messages.push(record.clone());
        self.publish_insert(Collection::Messages, &record)?;
        Ok(record)
    }

    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, StoreError> {
        Ok(self.records.read().await.rooms.clone())
    }

    async fn find_room(&self, id: Uuid) -> Result<Option<RoomRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.rooms.iter().find(|room| room.id == id).cloned())
    }

    async fn create_room(&self, new: NewRoom) -> Result<RoomRecord, StoreError> {
        let record = RoomRecord::from_new(new);
        let mut records = self.records.write().await;
        records.rooms.push(record.clone());
        self.publish_insert(Collection::Rooms, &record)?;
        Ok(record)
    }
}

#[async_trait]
impl ChangeFeed for MemoryStore {
    async fn subscribe(&self, collection: Collection) -> Result<ChangeStream, StoreError> {
        let receiver = self.feed(collection).subscribe();
        tracing::info!(%collection, "Subscribed to in-memory change feed");

        let stream = BroadcastStream::new(receiver).map(move |item| {
            item.map_err(|err| match err {
                BroadcastStreamRecvError::Lagged(skipped) => {
                    StoreError::FeedLagged { collection, skipped }
                }
            })
        });

        Ok(stream.boxed())
    }
}
