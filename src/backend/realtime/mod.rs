//! Real-time Update Module
//!
//! This module holds the broadcast side of the system: the publish-only
//! `BroadcastSink` primitive the change relay writes to, its
//! implementations, and the SSE endpoint that serves in-process broadcasts.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Sink trait, in-process channel sink, fan-out
//! ├── pusher.rs       - Hosted pub/sub REST sink
//! └── subscription.rs - SSE subscription handler
//! ```
//!
//! # Sinks
//!
//! - `ChannelSink` - always present; feeds `GET /realtime`
//! - `PusherSink` - added when hosted pub/sub credentials are configured
//! - `FanoutSink` - combines the two so one publish reaches both

/// Sink trait and in-process broadcasting
pub mod broadcast;

/// Hosted pub/sub REST sink
pub mod pusher;

/// Server-Sent Events subscription handler
pub mod subscription;

pub use broadcast::{
    broadcast_event, BroadcastSink, ChannelSink, FanoutSink, RealtimeEventBroadcast, SinkError,
};
pub use pusher::{PusherConfig, PusherSink};
pub use subscription::handle_realtime_subscription;
