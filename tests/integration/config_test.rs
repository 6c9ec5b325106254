//! Environment configuration
//!
//! These tests mutate process environment variables, so they run serially.

use chatrelay::backend::server::config::{ConfigError, DEFAULT_PORT};
use chatrelay::backend::server::ServerConfig;
use pretty_assertions::assert_eq;
use serial_test::serial;

const VARS: [&str; 11] = [
    "PORT",
    "DATABASE_URL",
    "JWT_SECRET_KEY",
    "FIREBASE_PROJECT_ID",
    "FIREBASE_JWKS_URL",
    "PUSHER_APP_ID",
    "PUSHER_KEY",
    "PUSHER_SECRET",
    "PUSHER_CLUSTER",
    "PUSHER_HOST",
    "RUST_LOG",
];

/// Clear every variable the server reads, then set `pairs`
fn with_env(pairs: &[(&str, &str)]) {
    for name in VARS {
        std::env::remove_var(name);
    }
    for (name, value) in pairs {
        std::env::set_var(name, value);
    }
}

#[test]
#[serial]
fn test_from_env_minimal() {
    with_env(&[("JWT_SECRET_KEY", "s3cret"), ("FIREBASE_PROJECT_ID", "demo")]);

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.database_url, None);
    assert_eq!(config.pusher, None);
}

#[test]
#[serial]
fn test_from_env_full() {
    with_env(&[
        ("PORT", "9090"),
        ("DATABASE_URL", "postgres://localhost/chat"),
        ("JWT_SECRET_KEY", "s3cret"),
        ("FIREBASE_PROJECT_ID", "demo"),
        ("FIREBASE_JWKS_URL", "http://127.0.0.1:9999/jwks"),
        ("PUSHER_APP_ID", "42"),
        ("PUSHER_KEY", "key"),
        ("PUSHER_SECRET", "secret"),
        ("PUSHER_CLUSTER", "eu"),
    ]);

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.port, 9090);
    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/chat"));
    assert_eq!(config.firebase_jwks_url.as_deref(), Some("http://127.0.0.1:9999/jwks"));

    let pusher = config.pusher.unwrap();
    assert_eq!(pusher.app_id, "42");
    assert_eq!(pusher.base_url(), "https://api-eu.pusher.com");
}

#[test]
#[serial]
fn test_from_env_missing_project() {
    with_env(&[("JWT_SECRET_KEY", "s3cret")]);

    assert_eq!(
        ServerConfig::from_env().unwrap_err(),
        ConfigError::MissingValue("FIREBASE_PROJECT_ID")
    );
}

#[test]
#[serial]
fn test_from_env_pusher_host_override() {
    with_env(&[
        ("JWT_SECRET_KEY", "s3cret"),
        ("FIREBASE_PROJECT_ID", "demo"),
        ("PUSHER_APP_ID", "42"),
        ("PUSHER_KEY", "key"),
        ("PUSHER_SECRET", "secret"),
        ("PUSHER_HOST", "http://127.0.0.1:4567"),
    ]);

    let pusher = ServerConfig::from_env().unwrap().pusher.unwrap();
    assert_eq!(pusher.base_url(), "http://127.0.0.1:4567");
}
