//! Backend Module
//!
//! All server-side code for the relay: the Axum HTTP server, the platform
//! client, and the two aggregation engines behind the API.
//!
//! # Architecture
//!
//! - **`server`** - Initialization, application state, configuration loading
//! - **`routes`** - Router assembly, CORS and tracing layers
//! - **`remote`** - `RemoteApi` trait and the reqwest-backed client
//! - **`projects`** - Recursive project tree aggregation
//! - **`views`** - Bounded preview fan-out and CSV export
//! - **`auth`** - Sign-in passthrough
//! - **`middleware`** - Credential extraction
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── remote/         - Platform REST client
//! ├── projects/       - Tree aggregation
//! ├── views/          - Preview fan-out, export
//! ├── auth/           - Sign-in
//! ├── middleware/     - Credential extractors
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. `TraceLayer` opens a span, `CorsLayer` handles preflight
//! 2. `RequireCredential` pulls the bearer token and site id from the request
//! 3. The handler runs `TreeAggregator` or `PreviewCollector` against the
//!    shared `RemoteApi`
//! 4. Any `BackendError` is rendered as `{ error, kind, status }`

/// Server initialization and state
pub mod server;

/// Route configuration
pub mod routes;

/// Analytics platform client
pub mod remote;

/// Project tree aggregation
pub mod projects;

/// View previews and export
pub mod views;

/// Sign-in passthrough
pub mod auth;

/// Request extractors
pub mod middleware;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use server::{create_app, AppState};
