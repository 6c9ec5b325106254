//! Shared Module
//!
//! This module contains the record and event types that cross component
//! boundaries: the store produces them, the relay and HTTP handlers consume
//! them, and clients receive them serialized as JSON.
//!
//! # Overview
//!
//! - **`records`** - Message and room documents plus their write requests
//! - **`event`** - Change-feed entries and real-time broadcast events

/// Message and room record types
pub mod records;

/// Change-feed and real-time event types
pub mod event;

pub use event::{ChangeEvent, Collection, OperationType, RealtimeEvent};
pub use records::{MessageRecord, NewMessage, NewRoom, RoomRecord};
