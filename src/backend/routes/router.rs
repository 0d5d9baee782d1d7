/**
 * Router Configuration
 *
 * Combines the health check, the API routes, CORS, and request tracing into
 * a single Axum router.
 *
 * # Layer Order
 *
 * 1. `TraceLayer` - one span per request, outermost
 * 2. `CorsLayer` - answers preflights before any handler runs
 * 3. Routes, then the 404 fallback
 */

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, StatusCode,
    },
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// - `GET /healthz` - liveness probe
/// - `POST /api/auth/signin` - sign-in passthrough
/// - `GET /api/projects` - nested project tree
/// - `GET /api/views` - views with previews
/// - `GET /api/views/{view_id}/data` - CSV export
///
/// Unknown routes get a plain 404.
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = cors_layer(&app_state.config.cors_allowed_origin);

    let router = Router::new().route("/healthz", get(healthz));
    let router = configure_api_routes(router);

    router
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn healthz() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// CORS policy for the browser front end
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-tableau-auth"),
            HeaderName::from_static("x-site-id"),
        ]);

    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!(
                "CORS origin {:?} is not a valid header value; cross-origin requests will be refused",
                origin
            );
            layer
        }
    }
}
