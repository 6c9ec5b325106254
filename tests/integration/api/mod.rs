//! HTTP route integration tests
