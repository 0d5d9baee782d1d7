/**
 * API Routes
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/signin` - Exchange a sign-in secret for a platform session
 *
 * ## Content
 * - `GET /api/projects` - Nested project tree (requires credential)
 * - `GET /api/views` - Views with preview images (requires credential)
 * - `GET /api/views/{view_id}/data` - CSV export (requires credential)
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::sign_in;
use crate::backend::projects::get_project_tree;
use crate::backend::server::state::AppState;
use crate::backend::views::{export_view_data, get_views_with_previews};

/// Configure API routes
///
/// Routes that need a credential take it through the `RequireCredential`
/// extractor, so a request without one is rejected before any remote call.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/signin", post(sign_in))
        .route("/api/projects", get(get_project_tree))
        .route("/api/views", get(get_views_with_previews))
        .route("/api/views/{view_id}/data", get(export_view_data))
}
