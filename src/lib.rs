//! VizRelay - Analytics Platform Relay
//!
//! VizRelay sits between a browser front end and an analytics platform's
//! REST API. It holds no state of its own: every request carries the
//! caller's platform session, and the relay turns a handful of paginated,
//! flat platform listings into the shapes the front end wants.
//!
//! # Overview
//!
//! - **Project tree**: the top-level project listing is resolved level by
//!   level into a nested tree. A child listing that fails turns that node
//!   into a leaf instead of failing the request.
//! - **View previews**: every view's preview image is fetched concurrently
//!   (bounded), then joined back to the views in listing order. A failed or
//!   slow preview becomes `null`.
//! - **Passthroughs**: sign-in and CSV data export.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types (`Node`, `ViewRef`, `PreviewResult`,
//!   `Credential`), `RelayConfig`, shared errors
//! - **`backend`** - Axum server, platform client, aggregation engines
//!
//! # Usage
//!
//! ```rust,no_run
//! use vizrelay::backend::server::{create_app, load_config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(load_config()?)?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for malformed records and validation
//! - `backend::remote::RemoteError` for anything that went wrong upstream
//! - `backend::BackendError` as the single handler error, rendered as JSON

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
