/**
 * Backend Error Types
 *
 * This module defines the single error type returned by HTTP handlers.
 *
 * # Error Categories
 *
 * ## Caller Errors
 *
 * - `MissingCredential` - no bearer token or site id was supplied; raised
 *   before any remote call is made
 * - `HandlerError` - other request problems with an explicit status
 *
 * ## Upstream Errors
 *
 * - `RemoteUnavailable` - transport failure, non-success status or timeout
 * - `UpstreamShape` - the platform answered without an expected field
 * - `CycleDetected` / `DepthExceeded` - the project hierarchy cannot be
 *   turned into a finite tree
 *
 * Each variant reports a stable `kind()` string so callers can tell
 * "no credential" from "remote call failed" from "malformed upstream shape".
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::projects::TreeError;
use crate::backend::remote::RemoteError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use vizrelay::backend::error::BackendError;
///
/// let err = BackendError::missing_credential("no X-Tableau-Auth header");
/// assert_eq!(err.kind(), "MissingCredential");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Caller did not supply a usable credential
    #[error("Missing credential: {message}")]
    MissingCredential {
        /// Human-readable error message
        message: String,
    },

    /// Platform unreachable, failing or too slow
    #[error("Remote unavailable: {message}")]
    RemoteUnavailable {
        /// Human-readable error message
        message: String,
    },

    /// Platform payload lacks an expected field
    #[error("Upstream shape error: {message}")]
    UpstreamShape {
        /// Human-readable error message
        message: String,
    },

    /// Project hierarchy refers back to an ancestor
    #[error("Project {node_id} appears in its own ancestry")]
    CycleDetected {
        /// Project id seen twice on one path
        node_id: String,
    },

    /// Project hierarchy deeper than the configured limit
    #[error("Project hierarchy is deeper than {limit} levels")]
    DepthExceeded {
        /// Configured maximum depth
        limit: usize,
    },

    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Shared error (validation, shape)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new missing-credential error
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::MissingCredential {
            message: message.into(),
        }
    }

    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "MissingCredential",
            Self::RemoteUnavailable { .. } => "RemoteUnavailable",
            Self::UpstreamShape { .. } => "UpstreamShapeError",
            Self::CycleDetected { .. } => "CycleDetected",
            Self::DepthExceeded { .. } => "DepthExceeded",
            Self::HandlerError { status, .. } if status.is_client_error() => "BadRequest",
            Self::HandlerError { .. } => "Internal",
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => "BadRequest",
                SharedError::ShapeError { .. } => "UpstreamShapeError",
            },
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `MissingCredential` - 401 Unauthorized
    /// - `RemoteUnavailable`, `UpstreamShape`, `CycleDetected`,
    ///   `DepthExceeded` - 502 Bad Gateway
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 for validation, 502 for shape
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredential { .. } => StatusCode::UNAUTHORIZED,
            Self::RemoteUnavailable { .. }
            | Self::UpstreamShape { .. }
            | Self::CycleDetected { .. }
            | Self::DepthExceeded { .. } => StatusCode::BAD_GATEWAY,
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::ShapeError { .. } => StatusCode::BAD_GATEWAY,
            },
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::MissingCredential { message }
            | Self::RemoteUnavailable { message }
            | Self::UpstreamShape { message }
            | Self::HandlerError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<RemoteError> for BackendError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Shape(message) => Self::UpstreamShape { message },
            RemoteError::Config(err) => {
                Self::handler(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            other => Self::RemoteUnavailable {
                message: other.to_string(),
            },
        }
    }
}

impl From<TreeError> for BackendError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::Remote(err) => err.into(),
            TreeError::CycleDetected { node_id } => Self::CycleDetected { node_id },
            TreeError::DepthExceeded { limit } => Self::DepthExceeded { limit },
        }
    }
}
