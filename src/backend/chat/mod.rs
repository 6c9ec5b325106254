//! Chat Backend Module
//!
//! Server-side record routes for messages and rooms. Handlers read and
//! write through the `ChatStore` held in application state.
//!
//! # Architecture
//!
//! - **`handlers`** - HTTP handlers for `/messages/*` and `/rooms/*`

/// Record route handlers
pub mod handlers;

pub use handlers::{create_message, create_room, find_room, list_messages, list_rooms};
