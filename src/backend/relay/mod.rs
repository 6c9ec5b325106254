//! Change Relay Module
//!
//! Turns document-store insert events into broadcast notifications. Each
//! watched collection gets its own subscription and its own task, so a
//! failure in one never holds up the other.
//!
//! # Flow
//!
//! ```text
//! ChangeFeed::subscribe(messages) ──► forward(MESSAGE_INSERTED) ──► publish("message", "inserted")
//! ChangeFeed::subscribe(rooms)    ──► forward(ROOM_INSERTED)    ──► publish("room", "inserted")
//! ```
//!
//! Per collection, events are published in feed order. There is no
//! ordering between collections, no deduplication of redelivered events and
//! no backpressure beyond awaiting each publish.
//!
//! # Module Structure
//!
//! ```text
//! relay/
//! ├── mod.rs    - Module exports and documentation
//! ├── rules.rs  - Per-collection channel, event name and projection
//! └── runner.rs - Subscription tasks, handle and error type
//! ```

/// Forwarding rules and projections
pub mod rules;

/// Relay tasks and lifecycle
pub mod runner;

pub use rules::{RelayRule, DEFAULT_RULES, MESSAGE_INSERTED, ROOM_INSERTED};
pub use runner::{forward, ChangeRelay, RelayError, RelayHandle};
