/**
 * Credential Extraction
 *
 * Request-side half of the identity gateway. Protected handlers take a
 * `RequireCredential` argument, which pulls the platform session out of the
 * request before the handler body runs:
 *
 * - bearer token from `X-Tableau-Auth`, or `Authorization: Bearer <token>`
 * - site id from `X-Site-Id`, or the `siteId` query parameter
 *
 * If either is missing the request is rejected with `MissingCredential`
 * (401) and no remote call is attempted. A query string that does not parse
 * is a 400, never a silently dropped parameter.
 *
 * `TargetFilter` reads the optional `filter` query parameter that scopes the
 * project tree and views listing.
 */

use axum::{
    extract::{FromRequestParts, Query},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode, Uri},
};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::remote::client::AUTH_HEADER;
use crate::shared::{Credential, SharedError};

/// Header carrying the platform site id
pub const SITE_HEADER: &str = "X-Site-Id";

#[derive(Debug, Deserialize)]
struct GatewayQuery {
    #[serde(rename = "siteId")]
    site_id: Option<String>,
    filter: Option<String>,
}

fn gateway_query(uri: &Uri) -> Result<GatewayQuery, BackendError> {
    Query::<GatewayQuery>::try_from_uri(uri)
        .map(|Query(query)| query)
        .map_err(|err| {
            BackendError::handler(
                StatusCode::BAD_REQUEST,
                format!("invalid query string: {}", err.body_text()),
            )
        })
}

/// Token from an `Authorization` value, scheme matched case-insensitively
fn bearer_from_authorization(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then_some(token)
}

/// Reject filter values that would change the platform filter expression
///
/// The platform joins filter expressions with `,`, so a comma inside a
/// project name would smuggle in a second expression.
pub fn validate_filter(value: &str) -> Result<(), SharedError> {
    if value.contains(',') {
        return Err(SharedError::validation("filter", "must not contain ','"));
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Pull the platform credential out of request headers and query
pub fn extract_credential(headers: &HeaderMap, uri: &Uri) -> Result<Credential, BackendError> {
    let header = |name| headers.get(name).and_then(|value| value.to_str().ok());

    let bearer_token = non_empty(header(AUTH_HEADER)).or_else(|| {
        non_empty(header(AUTHORIZATION.as_str()).and_then(bearer_from_authorization))
    });
    let bearer_token = bearer_token.ok_or_else(|| {
        BackendError::missing_credential(format!(
            "send the session token in {} or Authorization: Bearer",
            AUTH_HEADER
        ))
    })?;

    let site_id = match non_empty(header(SITE_HEADER)) {
        Some(site_id) => Some(site_id),
        None => non_empty(gateway_query(uri)?.site_id.as_deref()),
    };
    let site_id = site_id.ok_or_else(|| {
        BackendError::missing_credential(format!(
            "send the site id in {} or the siteId query parameter",
            SITE_HEADER
        ))
    })?;

    Ok(Credential::new(bearer_token, site_id))
}

/// Axum extractor for the caller's platform credential
#[derive(Clone, Debug)]
pub struct RequireCredential(pub Credential);

impl<S> FromRequestParts<S> for RequireCredential
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let credential = extract_credential(&parts.headers, &parts.uri)?;
        tracing::debug!("Request credential for site {}", credential.site_id);
        Ok(RequireCredential(credential))
    }
}

/// Axum extractor for the optional root filter
///
/// Blank values are treated as absent. A malformed query string or a value
/// containing `,` is rejected with 400.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetFilter(pub Option<String>);

impl<S> FromRequestParts<S> for TargetFilter
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let filter = non_empty(gateway_query(&parts.uri)?.filter.as_deref());
        if let Some(value) = &filter {
            validate_filter(value)?;
        }
        Ok(TargetFilter(filter))
    }
}
