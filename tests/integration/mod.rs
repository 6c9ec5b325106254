//! Integration tests
//!
//! - `relay` - change relay behaviour against scripted feeds and real stores
//! - `api` - HTTP routes through the full router
//! - `realtime` - broadcast sinks and the SSE endpoint
//! - `config` - environment configuration
//! - `database` - PostgreSQL adapter (needs `TEST_DATABASE_URL`)

pub mod api;
pub mod config_test;
pub mod realtime;
