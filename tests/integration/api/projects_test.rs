//! Project tree API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::app_for;
use crate::common::*;

fn empty() -> serde_json::Value {
    projects(vec![])
}

#[tokio::test]
async fn test_projects_requires_credential() {
    let platform = MockPlatform::start().await;
    let (status, body) = send_json(app_for(&platform), anonymous_get("/api/projects")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "MissingCredential");
    assert_eq!(body["status"], 401);
    assert!(platform.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_projects_builds_nested_tree() {
    let platform = MockPlatform::start().await;
    platform
        .mount_projects("name:eq:Sales", projects(vec![project("S", "Sales", None)]))
        .await;
    platform
        .mount_projects(
            "parentProjectId:eq:S",
            projects(vec![project("E", "EMEA", Some("S")), project("N", "NA", Some("S"))]),
        )
        .await;
    platform
        .mount_projects(
            "parentProjectId:eq:E",
            projects(vec![project("U", "UK", Some("E"))]),
        )
        .await;
    platform.mount_projects("parentProjectId:eq:N", empty()).await;
    platform.mount_projects("parentProjectId:eq:U", empty()).await;

    let (status, body) =
        send_json(app_for(&platform), authed_get("/api/projects?filter=Sales")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rawData"]["projects"]["project"][0]["id"], "S");
    assert_eq!(
        body["nestedProjects"],
        json!([{
            "id": "S", "name": "Sales", "parentId": null,
            "children": [
                {
                    "id": "E", "name": "EMEA", "parentId": "S",
                    "children": [
                        { "id": "U", "name": "UK", "parentId": "E", "children": [] }
                    ]
                },
                { "id": "N", "name": "NA", "parentId": "S", "children": [] }
            ]
        }])
    );
}

#[tokio::test]
async fn test_projects_failed_child_listing_becomes_leaf() {
    let platform = MockPlatform::start().await;
    platform
        .mount_projects(
            "topLevelProject:eq:true",
            projects(vec![project("A", "A", None), project("B", "B", None)]),
        )
        .await;
    platform.mount_projects_status("parentProjectId:eq:A", 500).await;
    platform
        .mount_projects(
            "parentProjectId:eq:B",
            projects(vec![project("B1", "B1", Some("B"))]),
        )
        .await;
    platform.mount_projects("parentProjectId:eq:B1", empty()).await;

    let (status, body) = send_json(app_for(&platform), authed_get("/api/projects")).await;

    assert_eq!(status, StatusCode::OK);
    let roots = body["nestedProjects"].as_array().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0]["id"], "A");
    assert_eq!(roots[0]["children"], json!([]));
    assert_eq!(roots[1]["children"][0]["id"], "B1");
}

#[tokio::test]
async fn test_projects_root_failure_is_bad_gateway() {
    let platform = MockPlatform::start().await;
    platform.mount_projects_status("topLevelProject:eq:true", 503).await;

    let (status, body) = send_json(app_for(&platform), authed_get("/api/projects")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "RemoteUnavailable");
    assert_eq!(body["status"], 502);
}

#[tokio::test]
async fn test_projects_malformed_root_is_shape_error() {
    let platform = MockPlatform::start().await;
    platform
        .mount_projects("topLevelProject:eq:true", json!({"unexpected": true}))
        .await;

    let (status, body) = send_json(app_for(&platform), authed_get("/api/projects")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "UpstreamShapeError");
}

#[tokio::test]
async fn test_projects_cycle_is_reported() {
    let platform = MockPlatform::start().await;
    platform
        .mount_projects("topLevelProject:eq:true", projects(vec![project("A", "A", None)]))
        .await;
    platform
        .mount_projects(
            "parentProjectId:eq:A",
            projects(vec![project("B", "B", Some("A"))]),
        )
        .await;
    platform
        .mount_projects(
            "parentProjectId:eq:B",
            projects(vec![project("A", "A", Some("B"))]),
        )
        .await;

    let (status, body) = send_json(app_for(&platform), authed_get("/api/projects")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "CycleDetected");
}

#[tokio::test]
async fn test_projects_site_id_from_query() {
    let platform = MockPlatform::start().await;
    platform
        .mount_projects("topLevelProject:eq:true", empty())
        .await;

    let request = axum::http::Request::builder()
        .uri(format!("/api/projects?siteId={SITE_ID}"))
        .header("Authorization", format!("Bearer {TOKEN}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = send_json(app_for(&platform), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nestedProjects"], json!([]));
}

#[tokio::test]
async fn test_projects_filter_with_comma_is_rejected() {
    let platform = MockPlatform::start().await;

    let (status, body) = send_json(
        app_for(&platform),
        authed_get("/api/projects?filter=Sales,parentProjectId:eq:X"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
    assert!(platform.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_projects_duplicate_filter_is_rejected() {
    let platform = MockPlatform::start().await;

    let (status, body) = send_json(
        app_for(&platform),
        authed_get("/api/projects?filter=Sales&filter=Finance"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
    assert!(platform.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_projects_raw_data_is_first_root_page() {
    let platform = MockPlatform::start().await;
    let filter = "topLevelProject:eq:true";
    platform
        .mount_projects_page(
            filter,
            1,
            projects_page(vec![project("A", "A", None), project("B", "B", None)], 1, 3),
        )
        .await;
    platform
        .mount_projects_page(filter, 2, projects_page(vec![project("C", "C", None)], 2, 3))
        .await;
    for parent in ["A", "B", "C"] {
        platform
            .mount_projects(&format!("parentProjectId:eq:{parent}"), empty())
            .await;
    }
    let app = vizrelay::backend::server::create_app(
        platform.config_builder().page_size(2).build().unwrap(),
    )
    .unwrap();

    let (status, body) = send_json(app, authed_get("/api/projects")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rawData"]["pagination"]["pageNumber"], "1");
    assert_eq!(body["rawData"]["projects"]["project"].as_array().unwrap().len(), 2);
    let roots: Vec<&str> = body["nestedProjects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["id"].as_str().unwrap())
        .collect();
    assert_eq!(roots, vec!["A", "B", "C"]);
}
