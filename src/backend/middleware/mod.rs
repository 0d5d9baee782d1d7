//! Middleware Module
//!
//! This module contains the request-processing pieces that run before
//! handlers.
//!
//! # Architecture
//!
//! - **`credential`** - extractors for the caller's platform credential and
//!   root filter
//!
//! # Example
//!
//! ```rust,no_run
//! use vizrelay::backend::middleware::{RequireCredential, TargetFilter};
//!
//! async fn handler(RequireCredential(credential): RequireCredential, TargetFilter(filter): TargetFilter) {
//!     // credential.site_id, filter.as_deref()
//! }
//! ```

pub mod credential;

pub use credential::{extract_credential, validate_filter, RequireCredential, TargetFilter, SITE_HEADER};
