//! Backend Module
//!
//! This module contains all server-side code: the Axum HTTP server, the
//! document store adapters, the change relay and the broadcast sinks.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`chat`** - Message and room record handlers
//! - **`auth`** - Identity verification and session tokens
//! - **`middleware`** - Session middleware for the record routes
//! - **`store`** - Document store traits and adapters with change feeds
//! - **`relay`** - Change feed to broadcast sink forwarding
//! - **`realtime`** - Broadcast sinks and the SSE endpoint
//! - **`error`** - Handler error type
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── chat/           - Record handlers
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── store/          - Document store
//! ├── relay/          - Change relay
//! ├── realtime/       - Broadcast sinks
//! └── error/          - Error types
//! ```
//!
//! # Data Flow
//!
//! ```text
//! POST /messages/new ──► ChatStore ──► change feed ──► ChangeRelay ──► BroadcastSink
//!                                                                        ├─► /realtime (SSE)
//!                                                                        └─► hosted pub/sub
//! ```
//!
//! Handlers never publish. Broadcasts come only from the relay watching the
//! store, so records inserted by any writer are announced.

/// Server initialization, configuration and state
pub mod server;

/// HTTP route configuration
pub mod routes;

/// Message and room record handlers
pub mod chat;

/// Identity verification and session tokens
pub mod auth;

/// Request middleware
pub mod middleware;

/// Document store traits and adapters
pub mod store;

/// Change feed to broadcast forwarding
pub mod relay;

/// Broadcast sinks and SSE endpoint
pub mod realtime;

/// Handler error type
pub mod error;

pub use error::BackendError;
pub use relay::{ChangeRelay, RelayHandle};
pub use server::{build_server, AppState, ServerConfig};
