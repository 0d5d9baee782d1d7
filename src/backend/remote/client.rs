/**
 * REST Client
 *
 * reqwest-backed implementation of `RemoteApi` for the analytics platform's
 * REST API (`{base}/api/{version}/...`).
 *
 * # Authentication
 *
 * Every call except sign-in carries the session token in `X-Tableau-Auth`.
 *
 * # Pagination
 *
 * List endpoints are requested page by page until the collected record count
 * reaches `pagination.totalAvailable`. Callers only see the concatenated,
 * remote-ordered result.
 *
 * # Timeouts
 *
 * The shared `reqwest::Client` is built with the configured per-call timeout,
 * so a stalled platform surfaces as a transport error instead of a hang.
 */

use bytes::Bytes;
use futures_util::future::BoxFuture;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde_json::{json, Value};

use super::{NodePage, NodeScope, RemoteApi, RemoteError};
use crate::shared::{Credential, Node, RelayConfig, SignInSecret, ViewRef};

/// Session header understood by the platform
pub const AUTH_HEADER: &str = "X-Tableau-Auth";

/// Analytics platform REST client
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Clone, Debug)]
pub struct RestClient {
    http: Client,
    api_root: Url,
    page_size: u32,
}

impl RestClient {
    /// Build a client from the relay configuration
    pub fn new(config: &RelayConfig) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| RemoteError::transport(config.base_url.as_str(), source))?;

        Ok(Self {
            http,
            api_root: config.api_url("")?,
            page_size: config.page_size,
        })
    }

    /// URL for path segments below the API root, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a request and reject non-success statuses
    async fn send(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, String)],
        accept: &str,
        credential: Option<&Credential>,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, RemoteError> {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url.clone())
            .query(query)
            .header(ACCEPT, accept);
        if let Some(credential) = credential {
            request = request.header(AUTH_HEADER, &credential.bearer_token);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| RemoteError::transport(url.as_str(), source))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} returned {}", url, status);
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_bytes(
        &self,
        url: Url,
        accept: &str,
        credential: &Credential,
    ) -> Result<Bytes, RemoteError> {
        let response = self
            .send(Method::GET, url.clone(), &[], accept, Some(credential), None)
            .await?;
        response
            .bytes()
            .await
            .map_err(|source| RemoteError::transport(url.as_str(), source))
    }

    async fn get_json(
        &self,
        url: Url,
        query: &[(&str, String)],
        credential: &Credential,
    ) -> Result<Value, RemoteError> {
        let response = self
            .send(Method::GET, url.clone(), query, "application/json", Some(credential), None)
            .await?;
        let body = response
            .bytes()
            .await
            .map_err(|source| RemoteError::transport(url.as_str(), source))?;
        serde_json::from_slice(&body)
            .map_err(|err| RemoteError::shape(format!("{} returned invalid JSON: {}", url, err)))
    }

    /// Collect every record of a paginated list endpoint
    ///
    /// Returns the records in remote order plus the first page payload.
    async fn get_paged(
        &self,
        url: Url,
        filter: Option<String>,
        collection: &str,
        item: &str,
        credential: &Credential,
    ) -> Result<(Vec<Value>, Value), RemoteError> {
        let mut records = Vec::new();
        let mut first_page = None;
        let mut page_number = 1u32;

        loop {
            let mut query = vec![
                ("pageSize", self.page_size.to_string()),
                ("pageNumber", page_number.to_string()),
            ];
            if let Some(filter) = &filter {
                query.push(("filter", filter.clone()));
            }

            let payload = self.get_json(url.clone(), &query, credential).await?;
            let batch = extract_records(&payload, collection, item)?;
            let fetched = batch.len();
            records.extend(batch);
            let total = total_available(&payload);
            if first_page.is_none() {
                first_page = Some(payload);
            }

            match total {
                Some(total) if records.len() < total && fetched > 0 => page_number += 1,
                _ => break,
            }
        }

        Ok((records, first_page.unwrap_or_default()))
    }
}

/// Pull `payload[collection][item]` out as a list
///
/// A missing `collection` object is a shape error; a present collection
/// without `item` is an empty list, which is how the platform reports none.
fn extract_records(payload: &Value, collection: &str, item: &str) -> Result<Vec<Value>, RemoteError> {
    let container = payload
        .get(collection)
        .filter(|value| value.is_object())
        .ok_or_else(|| RemoteError::shape(format!("response has no `{}` object", collection)))?;

    match container.get(item) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(records)) => Ok(records.clone()),
        Some(record @ Value::Object(_)) => Ok(vec![record.clone()]),
        Some(_) => Err(RemoteError::shape(format!(
            "`{}.{}` is neither a list nor a record",
            collection, item
        ))),
    }
}

/// `pagination.totalAvailable`, which the platform sends as a string
fn total_available(payload: &Value) -> Option<usize> {
    match payload.get("pagination")?.get("totalAvailable")? {
        Value::String(raw) => raw.parse().ok(),
        Value::Number(number) => number.as_u64().map(|n| n as usize),
        _ => None,
    }
}

/// Sign-in request body in the platform's JSON format
fn sign_in_body(secret: &SignInSecret, content_url: &str) -> Value {
    let site = json!({ "contentUrl": content_url });
    match secret {
        SignInSecret::PersonalAccessToken {
            personal_access_token_name,
            personal_access_token_secret,
        } => json!({
            "credentials": {
                "personalAccessTokenName": personal_access_token_name,
                "personalAccessTokenSecret": personal_access_token_secret,
                "site": site,
            }
        }),
        SignInSecret::Password { name, password } => json!({
            "credentials": {
                "name": name,
                "password": password,
                "site": site,
            }
        }),
    }
}

/// Read `credentials.token` and `credentials.site.id` from a sign-in response
fn credential_from_sign_in(payload: &Value) -> Result<Credential, RemoteError> {
    let credentials = payload
        .get("credentials")
        .ok_or_else(|| RemoteError::shape("sign-in response has no credentials"))?;
    let token = credentials
        .get("token")
        .and_then(Value::as_str)
        .ok_or_else(|| RemoteError::shape("sign-in response has no token"))?;
    let site_id = credentials
        .get("site")
        .and_then(|site| site.get("id"))
        .and_then(Value::as_str)
        .ok_or_else(|| RemoteError::shape("sign-in response has no site id"))?;

    Ok(Credential::new(token, site_id))
}

impl RemoteApi for RestClient {
    fn fetch_nodes<'a>(
        &'a self,
        scope: NodeScope<'a>,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<NodePage, RemoteError>> {
        Box::pin(async move {
            let url = self.endpoint(&["sites", &credential.site_id, "projects"]);
            let (records, raw) = self
                .get_paged(url, Some(scope.filter_expression()), "projects", "project", credential)
                .await?;

            let nodes = records
                .iter()
                .map(Node::from_record)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(NodePage { nodes, raw })
        })
    }

    fn list_views<'a>(
        &'a self,
        filter: Option<&'a str>,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<Vec<ViewRef>, RemoteError>> {
        Box::pin(async move {
            let url = self.endpoint(&["sites", &credential.site_id, "views"]);
            let filter = filter.map(|name| format!("projectName:eq:{name}"));
            let (records, _) = self.get_paged(url, filter, "views", "view", credential).await?;

            let views = records
                .into_iter()
                .map(ViewRef::from_record)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(views)
        })
    }

    fn fetch_preview<'a>(
        &'a self,
        site_id: &'a str,
        workbook_id: &'a str,
        view_id: &'a str,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<Bytes, RemoteError>> {
        Box::pin(async move {
            let url = self.endpoint(&[
                "sites",
                site_id,
                "workbooks",
                workbook_id,
                "views",
                view_id,
                "previewImage",
            ]);
            self.get_bytes(url, "image/png", credential).await
        })
    }

    fn export_view_data<'a>(
        &'a self,
        view_id: &'a str,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<Bytes, RemoteError>> {
        Box::pin(async move {
            let url = self.endpoint(&["sites", &credential.site_id, "views", view_id, "data"]);
            self.get_bytes(url, "text/csv", credential).await
        })
    }

    fn sign_in<'a>(
        &'a self,
        secret: &'a SignInSecret,
        content_url: &'a str,
    ) -> BoxFuture<'a, Result<Credential, RemoteError>> {
        Box::pin(async move {
            let url = self.endpoint(&["auth", "signin"]);
            let body = sign_in_body(secret, content_url);
            let response = self
                .send(Method::POST, url.clone(), &[], "application/json", None, Some(&body))
                .await?;
            let payload: Value = response
                .json()
                .await
                .map_err(|_| RemoteError::shape("sign-in response is not JSON"))?;
            credential_from_sign_in(&payload)
        })
    }
}
