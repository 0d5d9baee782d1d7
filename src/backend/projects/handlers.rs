/**
 * Project Handlers
 *
 * `GET /api/projects?filter=<name>` returns the raw top-level listing together
 * with the fully nested project tree.
 */

use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::middleware::{RequireCredential, TargetFilter};
use crate::backend::projects::tree::TreeAggregator;
use crate::backend::server::state::AppState;
use crate::shared::ProjectTreeResponse;

/// Nested project tree handler
///
/// `rawData` is the platform's first page of the root listing, untouched.
/// When the root listing spans several pages, `nestedProjects` holds the
/// roots from every page while `rawData` still shows page one only.
///
/// # Errors
///
/// * `401 Unauthorized` - no credential supplied
/// * `502 Bad Gateway` - root listing failed, was malformed, or the hierarchy
///   is cyclic or too deep
///
/// # Example Response
///
/// ```json
/// {
///   "rawData": { "pagination": { ... }, "projects": { "project": [ ... ] } },
///   "nestedProjects": [
///     { "id": "A", "name": "A", "parentId": null, "children": [
///       { "id": "A1", "name": "A1", "parentId": "A", "children": [] }
///     ] }
///   ]
/// }
/// ```
pub async fn get_project_tree(
    State(state): State<AppState>,
    RequireCredential(credential): RequireCredential,
    TargetFilter(filter): TargetFilter,
) -> Result<Json<ProjectTreeResponse>, BackendError> {
    tracing::info!("Project tree request for filter {:?}", filter);

    let tree = TreeAggregator::new(state.remote.as_ref(), &credential, &state.config)
        .build(filter.as_deref())
        .await?;

    tracing::info!(
        "Project tree resolved: {} node(s)",
        tree.nested_projects.iter().map(|node| node.subtree_len()).sum::<usize>()
    );
    Ok(Json(tree))
}
