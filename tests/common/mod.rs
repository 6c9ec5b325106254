//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A full test server over the in-memory store
//! - Recording broadcast sinks and scripted change feeds
//! - Identity and session token helpers
//! - Mock HTTP servers for the identity provider and hosted pub/sub
//! - Database fixtures (only when `TEST_DATABASE_URL` is set)
//! - Custom assertion macros

#[cfg(feature = "ssr")]
pub mod app;
pub mod assertions;
#[cfg(feature = "ssr")]
pub mod mock_server;

#[cfg(feature = "ssr")]
pub use app::*;
#[cfg(feature = "ssr")]
pub use auth_helpers::*;
#[cfg(feature = "ssr")]
pub use fakes::*;
#[cfg(feature = "ssr")]
pub use mock_server::*;
