//! Write path to broadcast, through the real router, store and relay
//!
//! A record created over HTTP lands in the in-memory store, comes back out
//! of its change feed and reaches both the in-process channel (what
//! `/realtime` serves) and any extra sink.

use axum::http::{Method, StatusCode};
use chatrelay::backend::realtime::BroadcastSink;
use chatrelay::shared::RealtimeEvent;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::common::{authed, send, RecordingSink, TestApp, WAIT_TIMEOUT};

async fn next_event(rx: &mut broadcast::Receiver<RealtimeEvent>) -> RealtimeEvent {
    tokio::time::timeout(WAIT_TIMEOUT, rx.recv())
        .await
        .expect("Timed out waiting for a broadcast")
        .expect("Broadcast channel closed")
}

#[tokio::test]
async fn test_created_message_is_broadcast() {
    let extra = RecordingSink::new();
    let app = TestApp::with_extra_sink(Some(extra.clone() as Arc<dyn BroadcastSink>));
    let router = app.router();
    let mut rx = app.server.state.realtime_broadcast.subscribe();
    let handle = app.server.relay.start().await.unwrap();

    let response = send(
        router,
        authed(
            Method::POST,
            "/messages/new",
            Some(json!({"name": "A", "message": "hi", "timestamp": "t1", "received": true})),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let event = next_event(&mut rx).await;
    assert_eq!(event.channel, "message");
    assert_eq!(event.event, "inserted");
    // `received` never reaches the store, so it can't reach the broadcast
    assert_eq!(
        event.payload,
        json!({"name": "A", "message": "hi", "timestamp": "t1"})
    );

    let published = extra.wait_for(1).await;
    assert_eq!(published[0].payload, event.payload);

    handle.stop().await;
}

#[tokio::test]
async fn test_created_room_is_broadcast_with_its_id() {
    let app = TestApp::new();
    let router = app.router();
    let mut rx = app.server.state.realtime_broadcast.subscribe();
    let handle = app.server.relay.start().await.unwrap();

    let response = send(
        router,
        authed(Method::POST, "/rooms/new", Some(json!({"roomName": "General"}))),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let created = response.json();

    let event = next_event(&mut rx).await;
    assert_eq!(event.channel, "room");
    assert_eq!(
        event.payload,
        json!({"_id": created["_id"], "roomName": "General"})
    );

    handle.stop().await;
}

#[tokio::test]
async fn test_records_created_before_start_are_not_broadcast() {
    let app = TestApp::new();
    let router = app.router();
    let mut rx = app.server.state.realtime_broadcast.subscribe();

    let early = send(
        router.clone(),
        authed(Method::POST, "/rooms/new", Some(json!({"roomName": "Early"}))),
    )
    .await;
    assert_eq!(early.status, StatusCode::CREATED);

    let handle = app.server.relay.start().await.unwrap();

    send(
        router,
        authed(Method::POST, "/rooms/new", Some(json!({"roomName": "Late"}))),
    )
    .await;

    let event = next_event(&mut rx).await;
    assert_eq!(event.payload["roomName"], "Late");

    handle.stop().await;
}
