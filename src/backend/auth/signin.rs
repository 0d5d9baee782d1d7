/**
 * Sign-in Handler
 *
 * `POST /api/auth/signin` forwards a personal access token (or a name and
 * password) to the platform's sign-in endpoint and hands the resulting
 * session back to the browser as `{ token, siteId }`. The browser then sends
 * both with every other request.
 *
 * # Security
 *
 * - Secrets are never logged; `SignInSecret`'s `Debug` omits them
 * - A platform rejection (401/403) is reported as 401, not as a gateway error
 */

use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::remote::{with_deadline, RemoteError};
use crate::backend::server::state::AppState;
use crate::shared::{SharedError, SignInRequest, SignInResponse, SignInSecret};

fn validate(secret: &SignInSecret) -> Result<(), SharedError> {
    let (field, value, secret_field, secret_value) = match secret {
        SignInSecret::PersonalAccessToken {
            personal_access_token_name,
            personal_access_token_secret,
        } => (
            "personalAccessTokenName",
            personal_access_token_name,
            "personalAccessTokenSecret",
            personal_access_token_secret,
        ),
        SignInSecret::Password { name, password } => ("name", name, "password", password),
    };

    if value.trim().is_empty() {
        return Err(SharedError::validation(field, "must not be empty"));
    }
    if secret_value.is_empty() {
        return Err(SharedError::validation(secret_field, "must not be empty"));
    }
    Ok(())
}

/// Sign-in passthrough handler
///
/// # Errors
///
/// * `400 Bad Request` - name or secret is empty
/// * `401 Unauthorized` - the platform rejected the secret
/// * `502 Bad Gateway` - the platform was unreachable or answered oddly
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signin HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "personalAccessTokenName": "relay",
///   "personalAccessTokenSecret": "...",
///   "contentUrl": "embedseubl"
/// }
/// ```
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, BackendError> {
    validate(&request.secret)?;

    let content_url = request
        .content_url
        .as_deref()
        .unwrap_or(&state.config.site_content_url);
    tracing::info!("Sign-in request for site '{}'", content_url);

    let credential = with_deadline(
        "sign-in",
        state.config.request_timeout,
        state.remote.sign_in(&request.secret, content_url),
    )
    .await
    .map_err(|err| match err {
        RemoteError::Status { status: 401 | 403, .. } => {
            tracing::warn!("Platform rejected sign-in for site '{}'", content_url);
            BackendError::missing_credential("platform rejected the sign-in")
        }
        other => other.into(),
    })?;

    tracing::info!("Signed in to site {}", credential.site_id);
    Ok(Json(credential.into()))
}
