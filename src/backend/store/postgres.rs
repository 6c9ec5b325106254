/**
 * PostgreSQL Document Store
 *
 * Messages and rooms live in two tables shaped after their documents. The
 * change feed is built from row triggers (see `migrations/`) that publish a
 * JSON change event with `pg_notify` on one channel per collection:
 *
 * - `messages_changes`
 * - `rooms_changes`
 *
 * Each subscription opens its own `PgListener` connection, so the two
 * collections never share a socket. Notifications are delivered on commit,
 * in commit order.
 *
 * A listener never reconnects on its own: notifications sent while it is
 * disconnected are lost, so a dropped connection ends the feed instead.
 */

use async_trait::async_trait;
use futures_util::{stream, StreamExt};
use sqlx::postgres::PgListener;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ChangeFeed, ChangeStream, ChatStore, StoreError};
use crate::shared::{
    ChangeEvent, Collection, MessageRecord, NewMessage, NewRoom, RoomRecord,
};

/// PostgreSQL-backed store and change feed
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    message: String,
    name: String,
    timestamp: String,
    room: Option<Uuid>,
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    room_name: String,
    messages: Vec<Uuid>,
}

impl From<MessageRow> for MessageRecord {
    fn from(row: MessageRow) -> Self {
        MessageRecord {
            id: row.id,
            message: row.message,
            name: row.name,
            timestamp: row.timestamp,
            room: row.room,
        }
    }
}

impl From<RoomRow> for RoomRecord {
    fn from(row: RoomRow) -> Self {
        RoomRecord {
            id: row.id,
            room_name: row.room_name,
            messages: row.messages,
        }
    }
}

/// NOTIFY channel carrying a collection's change events
pub fn notify_channel(collection: Collection) -> &'static str {
    match collection {
        Collection::Messages => "messages_changes",
        Collection::Rooms => "rooms_changes",
    }
}

/// Decode a NOTIFY payload into a change event
pub fn decode_notification(
    collection: Collection,
    payload: &str,
) -> Result<ChangeEvent, StoreError> {
    serde_json::from_str(payload)
        .map_err(|source| StoreError::MalformedEvent { collection, source })
}

impl PgStore {
    /// Wrap an existing pool without touching the schema
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and bring the schema up to date
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to database...");
        let pool = PgPool::connect(database_url).await?;
        tracing::info!("Database connection pool created successfully");

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Run embedded migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!().run(&self.pool).await?;
        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ChatStore for PgStore {
    async fn list_messages(&self) -> Result<Vec<MessageRecord>, StoreError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, message, name, "timestamp", room
            FROM messages
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MessageRecord::from).collect())
    }

    async fn create_message(&self, new: NewMessage) -> Result<MessageRecord, StoreError> {
        let record = MessageRecord::from_new(new);

        sqlx::query(
            r#"
            INSERT INTO messages (id, message, name, "timestamp", room)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(&record.message)
        .bind(&record.name)
        .bind(&record.timestamp)
        .bind(record.room)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %record.id, "Message stored");
        Ok(record)
    }

    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, StoreError> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, room_name, messages
            FROM rooms
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RoomRecord::from).collect())
    }

    async fn find_room(&self, id: Uuid) -> Result<Option<RoomRecord>, StoreError> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, room_name, messages
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RoomRecord::from))
    }

    async fn create_room(&self, new: NewRoom) -> Result<RoomRecord, StoreError> {
        let record = RoomRecord::from_new(new);

        sqlx::query(
            r#"
            INSERT INTO rooms (id, room_name, messages)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(record.id)
        .bind(&record.room_name)
        .bind(&record.messages)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %record.id, "Room stored");
        Ok(record)
    }
}

#[async_trait]
impl ChangeFeed for PgStore {
    async fn subscribe(&self, collection: Collection) -> Result<ChangeStream, StoreError> {
        let channel = notify_channel(collection);

        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener.eager_reconnect(false);
        listener.listen(channel).await?;
        tracing::info!(%collection, channel, "Listening for change notifications");

        // `try_recv` yields `None` once when the connection drops; the next
        // call would silently reconnect, so the stream stops there.
        let stream = stream::unfold(Some(listener), move |listener| async move {
            let mut listener = listener?;
            match listener.try_recv().await {
                Ok(Some(notification)) => Some((
                    decode_notification(collection, notification.payload()),
                    Some(listener),
                )),
                Ok(None) => {
                    tracing::warn!(%collection, channel, "Listener connection lost");
                    None
                }
                Err(e) => Some((Err(StoreError::Database(e)), None)),
            }
        });

        Ok(stream.boxed())
    }
}
