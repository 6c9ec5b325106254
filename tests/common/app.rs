//! Test server helpers
//!
//! Builds the full router over an in-memory store and drives it with
//! `tower::ServiceExt::oneshot`, no listener needed.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chatrelay::backend::realtime::BroadcastSink;
use chatrelay::backend::server::{assemble_server, Server, SessionSecret};
use chatrelay::backend::store::MemoryStore;
use std::sync::Arc;
use tower::ServiceExt;

use super::auth_helpers::{session_token_for, StaticVerifier, TEST_SESSION_SECRET};

/// ID token the test verifier accepts
pub const TEST_ID_TOKEN: &str = "valid-id-token";

/// User id the test verifier answers with
pub const TEST_UID: &str = "user-1";

/// A server over a fresh in-memory store
pub struct TestApp {
    pub server: Server,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_extra_sink(None)
    }

    /// Server whose relay also publishes to `extra_sink`
    pub fn with_extra_sink(extra_sink: Option<Arc<dyn BroadcastSink>>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let server = assemble_server(
            store.clone(),
            Arc::new(StaticVerifier::accepting(TEST_ID_TOKEN, TEST_UID)),
            SessionSecret::new(TEST_SESSION_SECRET),
            extra_sink,
        );
        Self { server, store }
    }

    pub fn router(&self) -> Router {
        self.server.router.clone()
    }
}

/// Response status and body bytes
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Body is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Build a request, optionally authorized and with a JSON body
pub fn request(
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("Failed to build test request")
}

/// Request carrying a fresh session token for `TEST_UID`
pub fn authed(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let bearer = format!("Bearer {}", session_token_for(TEST_UID));
    request(method, uri, Some(&bearer), body)
}

/// Send one request through the router
pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router
        .oneshot(request)
        .await
        .expect("Router should not fail");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec();

    TestResponse {
        status,
        content_type,
        body,
    }
}
