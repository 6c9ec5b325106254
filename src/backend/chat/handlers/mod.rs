//! Chat Handlers Module
//!
//! Axum handlers for the message and room record routes.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── messages.rs - Message list and create
//! └── rooms.rs    - Room list, lookup and create
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use chatrelay::backend::chat::handlers::{create_message, list_messages};
//! use chatrelay::backend::server::state::AppState;
//! use axum::{routing::{get, post}, Router};
//!
//! # fn example() -> Router<AppState> {
//! Router::new()
//!     .route("/messages/sync", get(list_messages))
//!     .route("/messages/new", post(create_message))
//! # }
//! ```

/// Message handlers
pub mod messages;

/// Room handlers
pub mod rooms;

pub use messages::{create_message, list_messages};
pub use rooms::{create_room, find_room, list_rooms};
