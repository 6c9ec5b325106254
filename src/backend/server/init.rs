/**
 * Server Initialization
 *
 * This module wires the backend together from a `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. Open the document store (PostgreSQL with migrations, or in-memory)
 * 2. Build the broadcast sinks: the in-process channel sink always, plus
 *    the hosted pub/sub sink when credentials are configured
 * 3. Build the identity verifier and application state
 * 4. Create the router
 * 5. Prepare (but don't start) the change relay over the store's feed
 *
 * The caller starts the relay and serves the router; see the binary.
 * Cancelling `Server::shutdown` ends every open `/realtime` stream, which
 * graceful shutdown needs since those responses never finish on their own.
 */

use axum::Router;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::backend::auth::{FirebaseVerifier, IdentityVerifier};
use crate::backend::realtime::{BroadcastSink, ChannelSink, FanoutSink, PusherSink};
use crate::backend::relay::ChangeRelay;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::{AppState, SessionSecret};
use crate::backend::store::{ChangeFeed, ChatStore, MemoryStore, PgStore, StoreError};

/// Capacity of the in-process real-time channel
pub const REALTIME_CHANNEL_CAPACITY: usize = 1000;

/// Everything needed to run the server
pub struct Server {
    /// Router with state applied
    pub router: Router,
    /// Change relay over the store's feed, not yet started
    pub relay: ChangeRelay,
    /// State shared by the router's handlers
    pub state: AppState,
    /// Cancel to end long-lived responses before shutting down
    pub shutdown: CancellationToken,
}

/// Build the server from configuration
///
/// # Errors
///
/// Fails when `DATABASE_URL` is set but the database can't be reached or
/// migrated. Without `DATABASE_URL` the in-memory store is used and this
/// can't fail.
pub async fn build_server(config: &ServerConfig) -> Result<Server, StoreError> {
    tracing::info!("Initializing chat relay backend");

    let identity: Arc<dyn IdentityVerifier> = Arc::new(match &config.firebase_jwks_url {
        Some(url) => FirebaseVerifier::with_jwks_url(&config.firebase_project_id, url),
        None => FirebaseVerifier::new(&config.firebase_project_id),
    });

    let pusher = config.pusher.clone().map(|pusher| {
        tracing::info!("Hosted pub/sub enabled via {}", pusher.base_url());
        Arc::new(PusherSink::new(pusher)) as Arc<dyn BroadcastSink>
    });
    if pusher.is_none() {
        tracing::warn!("Pusher credentials not set. Broadcasting in-process only.");
    }

    let session_secret = SessionSecret::new(config.session_secret.clone());

    match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let store = Arc::new(PgStore::connect(url).await?);
            tracing::info!("Database connected and migrated");
            Ok(assemble_server(store, identity, session_secret, pusher))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using the in-memory store.");
            Ok(assemble_server(
                Arc::new(MemoryStore::new()),
                identity,
                session_secret,
                pusher,
            ))
        }
    }
}

/// Assemble a server around an already-open store
///
/// `extra_sink` is published to after the in-process channel sink.
pub fn assemble_server<S>(
    store: Arc<S>,
    identity: Arc<dyn IdentityVerifier>,
    session_secret: SessionSecret,
    extra_sink: Option<Arc<dyn BroadcastSink>>,
) -> Server
where
    S: ChatStore + ChangeFeed + 'static,
{
    let channel_sink = ChannelSink::with_capacity(REALTIME_CHANNEL_CAPACITY);
    let realtime_broadcast = channel_sink.sender();

    let mut sink = FanoutSink::new().with(Arc::new(channel_sink));
    if let Some(extra) = extra_sink {
        sink = sink.with(extra);
    }

    let feed: Arc<dyn ChangeFeed> = store.clone();
    let relay = ChangeRelay::new(feed, Arc::new(sink));

    let state = AppState {
        store,
        identity,
        session_secret,
        realtime_broadcast,
        shutdown: CancellationToken::new(),
    };

    let router = create_router(state.clone());

    tracing::info!("Router configured");

    Server {
        router,
        relay,
        shutdown: state.shutdown.clone(),
        state,
    }
}
