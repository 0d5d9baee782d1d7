/**
 * Remote Platform Errors
 *
 * Failures raised by the analytics platform client. Callers only need to
 * tell two situations apart:
 *
 * - the platform could not be reached, answered with a non-success status,
 *   or did not answer in time (`is_shape() == false`)
 * - the platform answered but the payload lacks a field the relay needs
 *   (`is_shape() == true`)
 *
 * Whether either is fatal is decided by the caller.
 */

use std::time::Duration;

use thiserror::Error;

use crate::shared::{ConfigError, SharedError};

#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection, TLS or body read failure
    #[error("transport failure calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Platform answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Call did not complete before its deadline
    #[error("{operation} did not finish within {timeout:?}")]
    Timeout { operation: String, timeout: Duration },

    /// Payload is missing an expected field
    #[error("unexpected upstream shape: {0}")]
    Shape(String),

    /// Endpoint URL could not be built
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RemoteError {
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Whether the platform answered with a malformed payload
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }
}

impl From<SharedError> for RemoteError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ShapeError { message } => Self::Shape(message),
            other => Self::Shape(other.to_string()),
        }
    }
}
