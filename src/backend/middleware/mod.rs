//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! - **`auth`** - Session middleware for protecting the record routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, Router};
//! use chatrelay::backend::middleware::require_session;
//! use chatrelay::backend::server::state::AppState;
//!
//! # fn example(state: AppState, protected: Router<AppState>) -> Router<AppState> {
//! protected.route_layer(middleware::from_fn_with_state(state, require_session))
//! # }
//! ```

pub mod auth;

pub use auth::{credential_from_headers, require_session, SessionUser};
