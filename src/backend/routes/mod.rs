//! Route Configuration Module
//!
//! This module configures all HTTP routes for the relay.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports and documentation
//! ├── router.rs      - Router creation, health check, CORS and tracing layers
//! └── api_routes.rs  - API endpoints
//! ```
//!
//! # Routes
//!
//! - `GET /healthz` - Liveness probe
//! - `POST /api/auth/signin` - Sign-in passthrough
//! - `GET /api/projects?filter=<name>` - Nested project tree
//! - `GET /api/views?filter=<projectName>` - Views with preview images
//! - `GET /api/views/{view_id}/data` - View data as CSV

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
