//! RestClient integration tests
//!
//! Pagination, error mapping and timeouts against a wiremock platform.

use std::time::Duration;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use vizrelay::backend::remote::{NodeScope, RemoteApi, RemoteError, RestClient};
use vizrelay::shared::{Credential, SignInSecret};

use crate::common::*;

fn credential() -> Credential {
    Credential::new(TOKEN, SITE_ID)
}

#[tokio::test]
async fn test_fetch_nodes_follows_pagination() {
    let platform = MockPlatform::start().await;
    let filter = "topLevelProject:eq:true";
    platform
        .mount_projects_page(
            filter,
            1,
            projects_page(vec![project("A", "Alpha", None), project("B", "Beta", None)], 1, 3),
        )
        .await;
    platform
        .mount_projects_page(filter, 2, projects_page(vec![project("C", "Gamma", None)], 2, 3))
        .await;

    let client = RestClient::new(&platform.config_builder().page_size(2).build().unwrap()).unwrap();
    let page = client
        .fetch_nodes(NodeScope::Root { filter: None }, &credential())
        .await
        .unwrap();

    let ids: Vec<&str> = page.nodes.iter().map(|node| node.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert_eq!(page.raw["pagination"]["pageNumber"], "1");
    assert_eq!(page.raw["projects"]["project"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_fetch_nodes_children_scope() {
    let platform = MockPlatform::start().await;
    platform
        .mount_projects(
            "parentProjectId:eq:A",
            projects(vec![project("A1", "Child", Some("A"))]),
        )
        .await;

    let client = RestClient::new(&platform.config()).unwrap();
    let page = client
        .fetch_nodes(NodeScope::Children("A"), &credential())
        .await
        .unwrap();

    assert_eq!(page.nodes.len(), 1);
    assert_eq!(page.nodes[0].parent_id.as_deref(), Some("A"));
    assert!(page.nodes[0].children.is_empty());
}

#[tokio::test]
async fn test_fetch_nodes_missing_collection_is_shape_error() {
    let platform = MockPlatform::start().await;
    platform
        .mount_projects("name:eq:Sales", json!({"pagination": {"totalAvailable": "0"}}))
        .await;

    let client = RestClient::new(&platform.config()).unwrap();
    let err = client
        .fetch_nodes(NodeScope::Root { filter: Some("Sales") }, &credential())
        .await
        .unwrap_err();

    assert_matches!(err, RemoteError::Shape(_));
}

#[tokio::test]
async fn test_fetch_nodes_server_error_is_status() {
    let platform = MockPlatform::start().await;
    platform.mount_projects_status("topLevelProject:eq:true", 500).await;

    let client = RestClient::new(&platform.config()).unwrap();
    let err = client
        .fetch_nodes(NodeScope::Root { filter: None }, &credential())
        .await
        .unwrap_err();

    assert_matches!(err, RemoteError::Status { status: 500, .. });
}

#[tokio::test]
async fn test_list_views_keeps_passthrough_fields() {
    let platform = MockPlatform::start().await;
    platform
        .mount_views(
            Some("Sales"),
            views(vec![view("v1", "wb1", "Overview"), view("v2", "wb1", "Detail")]),
        )
        .await;

    let client = RestClient::new(&platform.config()).unwrap();
    let listed = client.list_views(Some("Sales"), &credential()).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].view_id, "v1");
    assert_eq!(listed[0].workbook_id, "wb1");
    assert_eq!(listed[0].extra["name"], "Overview");
    assert_eq!(listed[1].extra["owner"]["id"], "owner-1");
}

#[tokio::test]
async fn test_fetch_preview_returns_bytes() {
    let platform = MockPlatform::start().await;
    platform.mount_preview("wb1", "v1", &[0x89, b'P', b'N', b'G']).await;

    let client = RestClient::new(&platform.config()).unwrap();
    let bytes = client
        .fetch_preview(SITE_ID, "wb1", "v1", &credential())
        .await
        .unwrap();

    assert_eq!(bytes.as_ref(), &[0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_slow_platform_times_out() {
    let platform = MockPlatform::start().await;
    platform
        .mount_slow_preview("wb1", "v1", Duration::from_secs(3))
        .await;

    let config = platform
        .config_builder()
        .request_timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let client = RestClient::new(&config).unwrap();
    let err = client
        .fetch_preview(SITE_ID, "wb1", "v1", &credential())
        .await
        .unwrap_err();

    assert_matches!(err, RemoteError::Transport { .. });
}

#[tokio::test]
async fn test_sign_in_reads_session() {
    let platform = MockPlatform::start().await;
    platform
        .mount_sign_in(200, sign_in_response("fresh-token", "site-9"))
        .await;

    let client = RestClient::new(&platform.config()).unwrap();
    let secret = SignInSecret::Password {
        name: "analyst".into(),
        password: "hunter2".into(),
    };
    let session = client.sign_in(&secret, "embedseubl").await.unwrap();

    assert_eq!(session, Credential::new("fresh-token", "site-9"));
}

#[tokio::test]
async fn test_sign_in_rejected_is_status() {
    let platform = MockPlatform::start().await;
    platform
        .mount_sign_in(401, json!({"error": {"code": "401001"}}))
        .await;

    let client = RestClient::new(&platform.config()).unwrap();
    let secret = SignInSecret::Password {
        name: "analyst".into(),
        password: "wrong".into(),
    };
    let err = client.sign_in(&secret, "").await.unwrap_err();

    assert_matches!(err, RemoteError::Status { status: 401, .. });
}
