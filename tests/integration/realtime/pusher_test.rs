//! Hosted pub/sub sink against a mock REST API

use assert_matches::assert_matches;
use chatrelay::backend::realtime::{BroadcastSink, FanoutSink, PusherSink, SinkError};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{closed_local_url, pusher_config_at, pusher_config_for, RecordingSink};

#[tokio::test]
async fn test_publish_posts_signed_trigger() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/3/events"))
        .and(header("content-type", "application/json"))
        .and(query_param("auth_key", "278d425bdf160c739803"))
        .and(query_param("auth_version", "1.0"))
        .and(body_json(json!({
            "name": "inserted",
            "channels": ["room"],
            "data": "{\"_id\":\"abc\",\"roomName\":\"General\"}",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let sink = PusherSink::new(pusher_config_for(&server));
    sink.publish("room", "inserted", json!({"_id": "abc", "roomName": "General"}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_signature_matches_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let sink = PusherSink::new(pusher_config_for(&server));
    sink.publish("message", "inserted", json!({"name": "A"}))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let query: Vec<(String, String)> = request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let timestamp: u64 = query
        .iter()
        .find(|(k, _)| k == "auth_timestamp")
        .map(|(_, v)| v.parse().unwrap())
        .expect("auth_timestamp missing");

    let body = String::from_utf8(request.body.clone()).unwrap();
    let expected = sink.signed_query(request.url.path(), &body, timestamp);
    assert_eq!(query, expected);
}

#[tokio::test]
async fn test_non_success_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid signature"))
        .mount(&server)
        .await;

    let sink = PusherSink::new(pusher_config_for(&server));
    let result = sink.publish("message", "inserted", json!({"name": "A"})).await;

    assert_matches!(
        result,
        Err(SinkError::Rejected { status: 401, ref body }) if body == "Invalid signature"
    );
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let sink = PusherSink::new(pusher_config_at(closed_local_url()));
    let result = sink.publish("message", "inserted", json!({"name": "A"})).await;
    assert_matches!(result, Err(SinkError::Transport(_)));
}

#[tokio::test]
async fn test_fanout_stops_at_first_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let after = RecordingSink::new();
    let fanout = FanoutSink::new()
        .with(Arc::new(PusherSink::new(pusher_config_for(&server))))
        .with(after.clone());

    let result = fanout.publish("room", "inserted", json!({"_id": "abc"})).await;
    assert_matches!(result, Err(SinkError::Rejected { status: 500, .. }));
    assert!(after.published().is_empty());
}
