//! Document Store Module
//!
//! This module gives the rest of the backend a handle to the two record
//! collections (`messages`, `rooms`) and to a live change feed per
//! collection.
//!
//! # Architecture
//!
//! - **`ChatStore`** - record reads and writes used by the HTTP handlers
//! - **`ChangeFeed`** - per-collection subscription used by the change relay
//!
//! Two adapters implement both traits:
//!
//! - **`postgres`** - PostgreSQL via `sqlx`; row triggers publish change
//!   events with `pg_notify` and subscriptions use `PgListener`
//! - **`memory`** - in-process store whose feed is a `tokio::sync::broadcast`
//!   channel, used when no database is configured and in tests
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Traits, error type, stream alias
//! ├── postgres.rs - PostgreSQL adapter
//! └── memory.rs   - In-memory adapter
//! ```

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::{ChangeEvent, Collection, MessageRecord, NewMessage, NewRoom, RoomRecord};

/// PostgreSQL adapter
pub mod postgres;

/// In-memory adapter
pub mod memory;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Live, non-restartable sequence of change events for one collection
///
/// An `Err` item means the subscription is no longer trustworthy; the end of
/// the stream means the feed was closed underneath the subscriber.
pub type ChangeStream = BoxStream<'static, Result<ChangeEvent, StoreError>>;

/// Errors raised by store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database query or connection failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A change notification could not be decoded
    #[error("Malformed change event on {collection}: {source}")]
    MalformedEvent {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    /// The subscriber fell behind and events were dropped
    #[error("Change feed for {collection} lagged, {skipped} events lost")]
    FeedLagged { collection: Collection, skipped: u64 },
}

/// Record reads and writes
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// All messages in insertion order
    async fn list_messages(&self) -> Result<Vec<MessageRecord>, StoreError>;

    /// Persist a new message and return the stored record
    async fn create_message(&self, new: NewMessage) -> Result<MessageRecord, StoreError>;

    /// All rooms in insertion order
    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, StoreError>;

    /// Look up a room by id
    async fn find_room(&self, id: Uuid) -> Result<Option<RoomRecord>, StoreError>;

    /// Persist a new room and return the stored record
    async fn create_room(&self, new: NewRoom) -> Result<RoomRecord, StoreError>;
}

/// Change subscription primitive
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    /// Open a live subscription to the given collection
    ///
    /// Only changes committed after the subscription is established are
    /// delivered.
    async fn subscribe(&self, collection: Collection) -> Result<ChangeStream, StoreError>;
}
