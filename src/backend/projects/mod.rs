//! Projects Module
//!
//! Recursive project/folder tree retrieval.
//!
//! # Module Structure
//!
//! ```text
//! projects/
//! ├── mod.rs       - Module exports
//! ├── tree.rs      - TreeAggregator and TreeError
//! └── handlers.rs  - HTTP handler
//! ```

/// Tree aggregation
pub mod tree;

/// HTTP handlers
pub mod handlers;

pub use handlers::get_project_tree;
pub use tree::{TreeAggregator, TreeError};
