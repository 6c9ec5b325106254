//! chatrelay - Chat Backend Library
//!
//! A small chat backend: users sign in through a third-party identity
//! provider and receive a short-lived session token, messages and rooms are
//! persisted in a document store, and every newly inserted record is relayed
//! to connected clients by watching the store's change feed.
//!
//! # Module Structure
//!
//! - **`shared`** - Record and event types (always compiled)
//!   - Message and room documents
//!   - Change-feed entries and broadcast events
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and routes
//!   - Document store adapters (PostgreSQL, in-memory) with change feeds
//!   - Change relay from store to broadcast sinks
//!   - Identity verification and session tokens
//!
//! # Usage
//!
//! ```rust,no_run
//! use chatrelay::backend::server::{config::ServerConfig, init::build_server};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let server = build_server(&config).await?;
//! let relay = server.relay.start().await?;
//! // Serve `server.router` with axum, watch `relay` for failures
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend modules and the server binary

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
