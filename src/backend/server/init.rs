/**
 * Server Initialization
 *
 * Builds the platform client, wraps it together with the configuration in
 * `AppState`, and hands the state to the router.
 *
 * # Initialization Process
 *
 * 1. Build the shared `RestClient` (one connection pool per process)
 * 2. Create `AppState`
 * 3. Create and configure the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::remote::{RemoteApi, RemoteError, RestClient};
use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::shared::RelayConfig;

/// Create the Axum application talking to the configured platform
///
/// # Errors
///
/// Fails only if the HTTP client cannot be built or the API root URL cannot
/// be derived from the configuration.
pub fn create_app(config: RelayConfig) -> Result<Router, RemoteError> {
    tracing::info!("Initializing relay backend");
    let client = RestClient::new(&config)?;
    Ok(create_app_with_remote(config, Arc::new(client)))
}

/// Create the Axum application on top of any `RemoteApi`
pub fn create_app_with_remote(config: RelayConfig, remote: Arc<dyn RemoteApi>) -> Router {
    let app_state = AppState::new(remote, config);
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
