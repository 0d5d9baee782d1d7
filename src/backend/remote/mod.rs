//! Remote Platform Module
//!
//! This module is the only place that talks to the analytics platform's REST
//! API. Everything above it (tree aggregation, preview fan-out, handlers)
//! depends on the `RemoteApi` trait, so tests can swap the HTTP client for an
//! in-memory fake.
//!
//! # Module Structure
//!
//! ```text
//! remote/
//! ├── mod.rs     - RemoteApi trait, NodeScope, deadline helper
//! ├── client.rs  - reqwest-backed RestClient
//! └── error.rs   - RemoteError
//! ```
//!
//! # Statelessness
//!
//! No method caches or refreshes anything. The `Credential` is passed into
//! every call and every call is safe to retry.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::shared::{Credential, Node, SignInSecret, ViewRef};

/// reqwest-backed client
pub mod client;

/// Remote error type
pub mod error;


pub use client::RestClient;
pub use error::RemoteError;

/// Which slice of the project hierarchy to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeScope<'a> {
    /// Top-level list, optionally narrowed to projects with this name
    Root { filter: Option<&'a str> },
    /// Direct children of the given project
    Children(&'a str),
}

impl NodeScope<'_> {
    /// Platform filter expression for this scope
    pub fn filter_expression(&self) -> String {
        match self {
            NodeScope::Root { filter: Some(name) } => format!("name:eq:{name}"),
            NodeScope::Root { filter: None } => "topLevelProject:eq:true".to_string(),
            NodeScope::Children(parent_id) => format!("parentProjectId:eq:{parent_id}"),
        }
    }
}

/// One fully paginated node listing
#[derive(Debug, Clone, PartialEq)]
pub struct NodePage {
    /// Nodes in remote order, children not yet resolved
    pub nodes: Vec<Node>,
    /// First page payload, untouched
    pub raw: Value,
}

/// Analytics platform operations used by the relay
///
/// Futures are boxed so the trait stays object safe and handlers can hold an
/// `Arc<dyn RemoteApi>`.
pub trait RemoteApi: Send + Sync {
    /// List projects in `scope`
    fn fetch_nodes<'a>(
        &'a self,
        scope: NodeScope<'a>,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<NodePage, RemoteError>>;

    /// List views, optionally narrowed to one project name
    fn list_views<'a>(
        &'a self,
        filter: Option<&'a str>,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<Vec<ViewRef>, RemoteError>>;

    /// Raw preview image bytes for one view
    fn fetch_preview<'a>(
        &'a self,
        site_id: &'a str,
        workbook_id: &'a str,
        view_id: &'a str,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<Bytes, RemoteError>>;

    /// Tabular data of one view as CSV bytes
    fn export_view_data<'a>(
        &'a self,
        view_id: &'a str,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<Bytes, RemoteError>>;

    /// Exchange a sign-in secret for a platform session
    fn sign_in<'a>(
        &'a self,
        secret: &'a SignInSecret,
        content_url: &'a str,
    ) -> BoxFuture<'a, Result<Credential, RemoteError>>;
}

/// Run a remote call under a deadline
///
/// Expiry is reported as `RemoteError::Timeout`, which callers treat exactly
/// like any other unavailability.
pub async fn with_deadline<T, F>(
    operation: impl Into<String>,
    timeout: Duration,
    call: F,
) -> Result<T, RemoteError>
where
    F: Future<Output = Result<T, RemoteError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(RemoteError::Timeout {
            operation: operation.into(),
            timeout,
        }),
    }
}
