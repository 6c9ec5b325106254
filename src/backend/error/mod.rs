//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers and its
//! conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation and 404 fallback
//! ```
//!
//! Layer-specific errors live next to their layer (`StoreError`,
//! `SinkError`, `RelayError`, `AuthError`, `ConfigError`); `BackendError`
//! only wraps the ones a handler can hit.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::not_found;
pub use types::BackendError;
