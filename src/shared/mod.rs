//! Shared Module
//!
//! This module contains the value types exchanged between the relay core, the
//! analytics platform client and the browser client. All types are designed
//! for JSON serialization with the camelCase field names the browser expects.
//!
//! # Overview
//!
//! - **`project`** - Project/folder `Node` and the nested tree response
//! - **`view`** - `ViewRef`, `PreviewResult` and the preview response
//! - **`credential`** - Per-request platform `Credential` and sign-in bodies
//! - **`config`** - Relay configuration and its builder
//! - **`error`** - Errors raised while building these types

/// Project tree types
pub mod project;

/// View and preview types
pub mod view;

/// Platform credential types
pub mod credential;

/// Shared error types
pub mod error;

/// Relay configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use project::{Node, ProjectTreeResponse};
pub use view::{PreviewResult, ViewPreviewsResponse, ViewRef};
pub use credential::{Credential, SignInRequest, SignInResponse, SignInSecret};
pub use error::SharedError;
pub use config::{ConfigError, RelayConfig, RelayConfigBuilder};
