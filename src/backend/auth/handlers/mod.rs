//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs          - Module exports and documentation
//! └── authenticate.rs - ID token exchange handler
//! ```
//!
//! # Handlers
//!
//! - **`authenticate`** - POST /authenticate - ID token in, session token out

/// ID token exchange handler
pub mod authenticate;

pub use authenticate::authenticate;
