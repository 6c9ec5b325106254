//! Mock server helpers for integration tests
//!
//! Wraps `wiremock` for the two external HTTP services: the identity
//! provider's JWK endpoint and the hosted pub/sub trigger API.

use chatrelay::backend::realtime::PusherConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// JWK set matching `fixtures/identity_test_key.pem`
pub const TEST_JWKS: &str = include_str!("../fixtures/identity_test_jwks.json");

/// Path the mock JWK endpoint is served on
pub const JWKS_PATH: &str = "/jwks";

/// Start a mock identity provider serving the test JWK set
pub async fn start_mock_identity_provider() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TEST_JWKS, "application/json"))
        .mount(&server)
        .await;
    server
}

/// Full JWK URL of a mock identity provider
pub fn jwks_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), JWKS_PATH)
}

/// Pusher configuration pointing at `server`
pub fn pusher_config_for(server: &MockServer) -> PusherConfig {
    pusher_config_at(server.uri())
}

/// Pusher credentials pointed at an arbitrary base URL
pub fn pusher_config_at(host: impl Into<String>) -> PusherConfig {
    PusherConfig {
        app_id: "3".to_string(),
        key: "278d425bdf160c739803".to_string(),
        secret: "7ad3773142a6692b25b8".to_string(),
        cluster: "us2".to_string(),
        host: Some(host.into()),
    }
}

/// Base URL of a local port with nothing listening on it
pub fn closed_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    format!("http://{addr}")
}
