/**
 * Application State
 *
 * `AppState` is the state shared by all handlers. It holds nothing
 * request-specific: the platform client (with its connection pool) and the
 * immutable configuration. Every request builds its own tree or preview
 * batch and drops it once the response is written.
 *
 * # Example
 *
 * ```rust,no_run
 * use vizrelay::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let timeout = state.config.request_timeout;
 * }
 * ```
 */

use std::sync::Arc;

use crate::backend::remote::RemoteApi;
use crate::shared::RelayConfig;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Analytics platform client
    pub remote: Arc<dyn RemoteApi>,
    /// Relay configuration
    pub config: Arc<RelayConfig>,
}

impl AppState {
    pub fn new(remote: Arc<dyn RemoteApi>, config: RelayConfig) -> Self {
        Self {
            remote,
            config: Arc::new(config),
        }
    }
}
