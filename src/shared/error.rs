//! Shared Error Types
//!
//! This module defines error types raised while turning platform payloads and
//! client input into the shared value types.
//!
//! # Error Categories
//!
//! - `ValidationError` - Client input that cannot be used
//! - `ShapeError` - Upstream records missing a field the relay needs
//!
//! # Usage
//!
//! ```rust
//! use vizrelay::shared::error::SharedError;
//!
//! let error = SharedError::shape("view record without workbook.id");
//! ```
use thiserror::Error;

/// Errors that can occur while building shared types
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Client input validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Upstream record is missing an expected field
    #[error("Unexpected upstream shape: {message}")]
    ShapeError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new shape error
    pub fn shape(message: impl Into<String>) -> Self {
        Self::ShapeError {
            message: message.into(),
        }
    }
}
