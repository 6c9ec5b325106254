//! Subscription failures
//!
//! A failure ends only the subscription it happened on and is reported on
//! the handle's failure channel.

use assert_matches::assert_matches;
use chatrelay::backend::realtime::SinkError;
use chatrelay::backend::relay::{ChangeRelay, RelayError, RelayHandle};
use chatrelay::backend::store::{ChangeFeed, StoreError};
use chatrelay::shared::{ChangeEvent, Collection, OperationType};
use serde_json::json;

use crate::common::{LogCapture, RecordingSink, ScriptedFeed, WAIT_TIMEOUT};

async fn next_failure(handle: &mut RelayHandle) -> RelayError {
    tokio::time::timeout(WAIT_TIMEOUT, handle.failed())
        .await
        .expect("Timed out waiting for a relay failure")
        .expect("Failure channel closed without a failure")
}

async fn wait_stopped(handle: &RelayHandle, collection: Collection) {
    tokio::time::timeout(WAIT_TIMEOUT, async {
        while handle.is_running(collection) {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Subscription should have stopped");
}

#[tokio::test]
async fn test_message_publish_failure_does_not_stop_rooms() {
    let sink = RecordingSink::failing_on("message");
    let (feed, controller) = ScriptedFeed::new();
    let mut handle = ChangeRelay::new(feed, sink.clone()).start().await.unwrap();

    controller.push(
        Collection::Messages,
        ChangeEvent::insert(json!({"name": "A", "message": "hi", "timestamp": "t1"})),
    );

    let failure = next_failure(&mut handle).await;
    assert_matches!(
        failure,
        RelayError::Publish {
            collection: Collection::Messages,
            channel: "message",
            event: "inserted",
            source: SinkError::Rejected { status: 503, .. },
        }
    );

    controller.push(
        Collection::Rooms,
        ChangeEvent::insert(json!({"_id": "abc", "roomName": "General", "messages": []})),
    );
    let publishes = sink.wait_for(1).await;
    assert_eq!(publishes[0].channel, "room");

    wait_stopped(&handle, Collection::Messages).await;
    assert!(handle.is_running(Collection::Rooms));
    handle.stop().await;
}

#[tokio::test]
async fn test_failed_publish_is_not_retried() {
    let sink = RecordingSink::failing_on("message");
    let (feed, controller) = ScriptedFeed::new();
    let mut handle = ChangeRelay::new(feed, sink.clone()).start().await.unwrap();

    controller.push(
        Collection::Messages,
        ChangeEvent::insert(json!({"name": "A", "message": "one", "timestamp": "t1"})),
    );
    controller.push(
        Collection::Messages,
        ChangeEvent::insert(json!({"name": "A", "message": "two", "timestamp": "t2"})),
    );

    next_failure(&mut handle).await;
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert!(sink.published().is_empty());
    wait_stopped(&handle, Collection::Messages).await;
    handle.stop().await;
}

#[tokio::test]
async fn test_feed_error_is_fatal_to_that_subscription() {
    let sink = RecordingSink::new();
    let (feed, controller) = ScriptedFeed::new();
    let mut handle = ChangeRelay::new(feed, sink.clone()).start().await.unwrap();

    controller.fail(
        Collection::Rooms,
        StoreError::FeedLagged {
            collection: Collection::Rooms,
            skipped: 3,
        },
    );

    let failure = next_failure(&mut handle).await;
    assert_matches!(
        failure,
        RelayError::Feed {
            collection: Collection::Rooms,
            source: StoreError::FeedLagged { skipped: 3, .. },
        }
    );

    controller.push(
        Collection::Messages,
        ChangeEvent::insert(json!({"name": "A", "message": "still here", "timestamp": "t1"})),
    );
    sink.wait_for(1).await;
    assert!(handle.is_running(Collection::Messages));
    handle.stop().await;
}

#[tokio::test]
async fn test_feed_end_is_reported() {
    let sink = RecordingSink::new();
    let (feed, mut controller) = ScriptedFeed::new();
    let mut handle = ChangeRelay::new(feed, sink).start().await.unwrap();

    controller.close(Collection::Messages);

    let failure = next_failure(&mut handle).await;
    assert_matches!(failure, RelayError::FeedClosed { collection: Collection::Messages });
    assert_eq!(failure.collection(), Collection::Messages);
    handle.stop().await;
}

#[tokio::test]
async fn test_insert_without_document_is_fatal() {
    let sink = RecordingSink::new();
    let (feed, controller) = ScriptedFeed::new();
    let mut handle = ChangeRelay::new(feed, sink.clone()).start().await.unwrap();

    controller.push(Collection::Rooms, ChangeEvent::of_kind(OperationType::Insert));

    let failure = next_failure(&mut handle).await;
    assert_matches!(failure, RelayError::MissingDocument { collection: Collection::Rooms });
    assert!(sink.published().is_empty());
    handle.stop().await;
}

#[tokio::test]
async fn test_subscribe_failure_starts_nothing() {
    let sink = RecordingSink::new();
    let (feed, _controller) = ScriptedFeed::new();

    // Claim the rooms subscription so the relay can't open it
    let _taken = feed.subscribe(Collection::Rooms).await.unwrap();

    let result = ChangeRelay::new(feed, sink).start().await;
    assert_matches!(
        result,
        Err(RelayError::Subscribe { collection: Collection::Rooms, .. })
    );
}

#[tokio::test]
async fn test_failure_is_logged() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let sink = RecordingSink::failing_on("room");
    let (feed, controller) = ScriptedFeed::new();
    let mut handle = ChangeRelay::new(feed, sink).start().await.unwrap();

    controller.push(
        Collection::Rooms,
        ChangeEvent::insert(json!({"_id": "abc", "roomName": "General"})),
    );
    next_failure(&mut handle).await;

    let entries = logs.lines_containing("Change relay stopped");
    assert!(!entries.is_empty(), "log was:\n{}", logs.contents());
    crate::assert_contains!(entries[0], "ERROR");
    crate::assert_contains!(entries[0], "rooms");
    handle.stop().await;
}

#[tokio::test]
async fn test_stop_ends_all_subscriptions() {
    let sink = RecordingSink::new();
    let (feed, _controller) = ScriptedFeed::new();
    let handle = ChangeRelay::new(feed, sink).start().await.unwrap();

    assert!(handle.is_running(Collection::Messages));
    assert!(handle.is_running(Collection::Rooms));

    tokio::time::timeout(WAIT_TIMEOUT, handle.stop())
        .await
        .expect("stop should not hang");
}
