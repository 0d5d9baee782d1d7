/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, allowing them to be
 * returned directly from handlers and extractors.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "kind": "RemoteUnavailable",
 *   "status": 502
 * }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{} ({}): {}", status, self.kind(), self.message());
        } else {
            tracing::warn!("{} ({}): {}", status, self.kind(), self.message());
        }

        let body = serde_json::json!({
            "error": self.message(),
            "kind": self.kind(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
