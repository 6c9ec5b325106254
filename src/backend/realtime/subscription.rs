/**
 * Real-time Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) handler for the
 * `/realtime` endpoint. It streams every event published on the in-process
 * `ChannelSink` to the connected client.
 *
 * # Channel Filtering
 *
 * Clients can restrict the stream to some channels with the `channels`
 * query parameter:
 * - `?channels=message` - only new messages
 * - `?channels=message,room` - messages and rooms
 * - No parameter - every channel
 *
 * # Connection Management
 *
 * - Connections are kept alive using the SSE keep-alive mechanism
 * - Lagged receivers are logged but don't cause connection drops
 * - The stream ends when the broadcast channel closes or the server's
 *   shutdown token is cancelled
 */

use crate::backend::realtime::broadcast::RealtimeEventBroadcast;
use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

/// Query parameters of `GET /realtime`
#[derive(Debug, Default, Deserialize)]
pub struct RealtimeQuery {
    /// Comma-separated channel names
    pub channels: Option<String>,
}

impl RealtimeQuery {
    /// Parsed channel filter, `None` meaning every channel
    pub fn channel_filter(&self) -> Option<Vec<String>> {
        self.channels
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|v| !v.is_empty())
    }
}

/// Handle real-time subscription (GET /realtime)
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Content-Type: text/event-stream
///
/// event: message:inserted
/// data: {"channel":"message","event":"inserted","payload":{...},"timestamp":"..."}
/// ```
pub async fn handle_realtime_subscription(
    State(broadcast_tx): State<RealtimeEventBroadcast>,
    State(shutdown): State<CancellationToken>,
    Query(query): Query<RealtimeQuery>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let filter = query.channel_filter();

    if let Some(ref channels) = filter {
        tracing::info!("[Realtime] Subscription filtered to channels: {:?}", channels);
    } else {
        tracing::info!("[Realtime] Subscription to all channels");
    }

    let broadcast_rx = broadcast_tx.subscribe();

    // Only yield when there is data; keep-alive comments hold the connection open
    let stream = stream::unfold((broadcast_rx, filter), |(mut rx, filter)| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(ref channels) = filter {
                        if !channels.iter().any(|c| c == &event.channel) {
                            continue;
                        }
                    }

                    let data = match serde_json::to_string(&event) {
                        Ok(data) => data,
                        Err(e) => {
                            tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                            continue;
                        }
                    };

                    let sse_event = Event::default().event(event.name()).data(data);
                    return Some((Ok(sse_event), (rx, filter)));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Realtime] Receiver lagged, skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => {
                    tracing::info!("[Realtime] Broadcast channel closed, ending stream");
                    return None;
                }
            }
        }
    })
    .take_until(shutdown.cancelled_owned());

    Sse::new(stream).keep_alive(KeepAlive::default())
}
