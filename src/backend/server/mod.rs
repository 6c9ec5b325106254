//! Server Module
//!
//! This module contains the code that configures and assembles the Axum
//! HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Environment configuration
//! └── init.rs         - Store, sinks, relay and router assembly
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Store**: PostgreSQL when `DATABASE_URL` is set, in-memory otherwise
//! 3. **Sinks**: in-process channel, plus hosted pub/sub when configured
//! 4. **Router Creation**: all routes and middleware
//! 5. **Relay**: returned unstarted, for the caller to start and supervise

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{assemble_server, build_server, Server};
pub use state::{AppState, SessionSecret};
