//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── api_routes.rs   - Public routes (welcome, authentication)
//! └── chat_routes.rs  - Session-protected record routes
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use chatrelay::backend::routes::create_router;
//! use chatrelay::backend::server::state::AppState;
//!
//! # async fn example(state: AppState) -> std::io::Result<()> {
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

/// Main router creation
pub mod router;

/// Public API routes
pub mod api_routes;

/// Session-protected chat routes
pub mod chat_routes;

pub use router::create_router;
