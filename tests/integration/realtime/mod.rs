//! Broadcast sink and SSE integration tests

pub mod pusher_test;
