/**
 * Real-time Event Broadcasting
 *
 * This module defines the publish-only broadcast primitive used by the
 * change relay, together with the in-process implementations:
 *
 * - `ChannelSink` - fans events out over `tokio::sync::broadcast` to every
 *   `/realtime` subscriber of this process
 * - `FanoutSink` - publishes to several sinks in order
 *
 * Delivery is best-effort: a sink reports failures of its own transport,
 * never whether anyone was listening.
 */

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::shared::RealtimeEvent;

/// Real-time update event broadcast
///
/// Cloned into every handler that needs to subscribe new clients.
pub type RealtimeEventBroadcast = broadcast::Sender<RealtimeEvent>;

/// Errors raised while publishing
#[derive(Debug, Error)]
pub enum SinkError {
    /// The request never produced a response
    #[error("Broadcast transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The broadcaster answered with a non-success status
    #[error("Broadcast rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The payload could not be encoded
    #[error("Broadcast payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Publish-only broadcast primitive
#[async_trait]
pub trait BroadcastSink: Send + Sync {
    /// Publish `payload` as `event` on `channel`
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), SinkError>;
}

/// In-process broadcast over a tokio channel
#[derive(Clone)]
pub struct ChannelSink {
    sender: RealtimeEventBroadcast,
}

impl ChannelSink {
    pub fn new(sender: RealtimeEventBroadcast) -> Self {
        Self { sender }
    }

    /// Create a sink with a fresh channel of the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn sender(&self) -> RealtimeEventBroadcast {
        self.sender.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl BroadcastSink for ChannelSink {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), SinkError> {
        let event = RealtimeEvent::new(channel, event, payload);
        broadcast_event(&self.sender, event);
        Ok(())
    }
}

/// Broadcast a real-time event to all subscribers
///
/// # Returns
///
/// Number of active subscribers that received the event (0 if no subscribers)
pub fn broadcast_event(broadcast_tx: &RealtimeEventBroadcast, event: RealtimeEvent) -> usize {
    let name = event.name();
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("[Realtime] {} delivered to {} subscribers", name, subscriber_count);
            subscriber_count
        }
        Err(_) => {
            tracing::debug!("[Realtime] No subscribers for {}", name);
            0
        }
    }
}

/// Publishes to every inner sink in order
///
/// Stops at the first failure and returns it; later sinks are not tried.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn BroadcastSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn BroadcastSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl BroadcastSink for FanoutSink {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), SinkError> {
        for sink in &self.sinks {
            sink.publish(channel, event, payload.clone()).await?;
        }
        Ok(())
    }
}
