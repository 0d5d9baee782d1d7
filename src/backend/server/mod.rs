//! Server Module
//!
//! Server initialization, shared state, and configuration loading.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports and documentation
//! ├── state.rs   - AppState shared by all handlers
//! ├── config.rs  - Configuration loading from the environment
//! └── init.rs    - App creation
//! ```
//!
//! # State Management
//!
//! `AppState` holds only the platform client and the immutable
//! configuration, both behind `Arc`. There is no lock anywhere in the
//! server: each request owns the tree or preview batch it builds.
//!
//! # Example
//!
//! ```rust,no_run
//! use vizrelay::backend::server::{config::load_config, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config()?;
//! let app = create_app(config)?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::load_config;
pub use init::{create_app, create_app_with_remote};
pub use state::AppState;
