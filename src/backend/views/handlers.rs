/**
 * View Handlers
 *
 * - `GET /api/views?filter=<projectName>` - views plus preview images
 * - `GET /api/views/{view_id}/data` - view data as a CSV download
 */

use axum::{
    extract::{Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::BackendError;
use crate::backend::middleware::{RequireCredential, TargetFilter};
use crate::backend::remote::with_deadline;
use crate::backend::server::state::AppState;
use crate::backend::views::previews::PreviewCollector;
use crate::shared::{SharedError, ViewPreviewsResponse};

/// List views under the target filter together with their previews
///
/// # Errors
///
/// * `401 Unauthorized` - no credential supplied
/// * `502 Bad Gateway` - the views listing failed or was malformed
///
/// Individual preview failures never fail the request; they appear as
/// `previewImage: null` in `images`.
pub async fn get_views_with_previews(
    State(state): State<AppState>,
    RequireCredential(credential): RequireCredential,
    TargetFilter(filter): TargetFilter,
) -> Result<Json<ViewPreviewsResponse>, BackendError> {
    tracing::info!("Views request for filter {:?}", filter);

    let response = PreviewCollector::new(state.remote.as_ref(), &credential, &state.config)
        .list_with_previews(filter.as_deref())
        .await?;

    Ok(Json(response))
}

/// Download the tabular data behind one view as CSV
pub async fn export_view_data(
    State(state): State<AppState>,
    RequireCredential(credential): RequireCredential,
    Path(view_id): Path<String>,
) -> Result<Response, BackendError> {
    let view_id = view_id.trim();
    if view_id.is_empty() {
        return Err(SharedError::validation("viewId", "must not be empty").into());
    }

    let csv = with_deadline(
        format!("data export of view {view_id}"),
        state.config.request_timeout,
        state.remote.export_view_data(view_id, &credential),
    )
    .await
    .map_err(|err| {
        tracing::error!("Export of view {} failed: {}", view_id, err);
        err
    })?;

    tracing::info!("Exported {} bytes for view {}", csv.len(), view_id);
    let disposition = format!("attachment; filename=\"{}.csv\"", download_name(view_id));

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

/// Filename-safe version of a view id
fn download_name(view_id: &str) -> String {
    view_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
