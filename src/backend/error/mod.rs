//! Backend Error Module
//!
//! This module defines error types specific to the relay server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and conversions from core errors
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Propagation
//!
//! Fatal failures (missing credential, root listing, views listing) become a
//! `BackendError` and abort the request. Per-item failures (one child listing,
//! one preview) never reach this module; they are logged and folded into the
//! result as empty children or `null` images.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
