//! Views Module
//!
//! View listing with preview images, and view data export.
//!
//! # Module Structure
//!
//! ```text
//! views/
//! ├── mod.rs       - Module exports
//! ├── previews.rs  - Bounded preview fan-out and join
//! └── handlers.rs  - HTTP handlers
//! ```

/// Preview fan-out
pub mod previews;

/// HTTP handlers
pub mod handlers;

pub use handlers::{export_view_data, get_views_with_previews};
pub use previews::PreviewCollector;
