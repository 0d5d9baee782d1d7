//! Sign-in API tests

use axum::http::StatusCode;
use serde_json::json;

use super::app_for;
use crate::common::*;

#[tokio::test]
async fn test_sign_in_with_access_token() {
    let platform = MockPlatform::start().await;
    platform
        .mount_sign_in(200, sign_in_response("fresh-token", "site-9"))
        .await;

    let request = json_post(
        "/api/auth/signin",
        &json!({
            "personalAccessTokenName": "relay",
            "personalAccessTokenSecret": "s3cr3t",
            "contentUrl": "embedseubl",
        }),
    );
    let (status, body) = send_json(app_for(&platform), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "token": "fresh-token", "siteId": "site-9" }));

    let received = platform.server.received_requests().await.unwrap();
    let forwarded: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(forwarded["credentials"]["personalAccessTokenName"], "relay");
    assert_eq!(forwarded["credentials"]["site"]["contentUrl"], "embedseubl");
}

#[tokio::test]
async fn test_sign_in_defaults_content_url_from_config() {
    let platform = MockPlatform::start().await;
    platform
        .mount_sign_in(200, sign_in_response("fresh-token", "site-9"))
        .await;

    let config = platform
        .config_builder()
        .site_content_url("configured-site")
        .build()
        .unwrap();
    let app = vizrelay::backend::server::create_app(config).unwrap();
    let request = json_post(
        "/api/auth/signin",
        &json!({ "name": "analyst", "password": "hunter2" }),
    );
    let (status, _) = send_json(app, request).await;

    assert_eq!(status, StatusCode::OK);
    let received = platform.server.received_requests().await.unwrap();
    let forwarded: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(forwarded["credentials"]["name"], "analyst");
    assert_eq!(forwarded["credentials"]["site"]["contentUrl"], "configured-site");
}

#[tokio::test]
async fn test_sign_in_rejected_is_unauthorized() {
    let platform = MockPlatform::start().await;
    platform
        .mount_sign_in(401, json!({"error": {"code": "401001", "summary": "Signin Error"}}))
        .await;

    let request = json_post(
        "/api/auth/signin",
        &json!({ "name": "analyst", "password": "wrong" }),
    );
    let (status, body) = send_json(app_for(&platform), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "MissingCredential");
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_sign_in_empty_password_is_bad_request() {
    let platform = MockPlatform::start().await;

    let request = json_post(
        "/api/auth/signin",
        &json!({ "name": "analyst", "password": "" }),
    );
    let (status, body) = send_json(app_for(&platform), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
    assert!(platform.server.received_requests().await.unwrap().is_empty());
}
