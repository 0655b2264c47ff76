mod common;

use axum::http::StatusCode;
use std::sync::Arc;

use common::{StubAuthGateway, demo_form};

#[tokio::test]
async fn test_session_requires_cookie() {
    let (server, _store) = common::test_server(Arc::new(StubAuthGateway::new()));

    let response = server.get("/api/session").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_session_returns_user_without_tokens() {
    let (server, _store) = common::test_server(Arc::new(StubAuthGateway::new()));

    let sid = server.post("/login").form(&demo_form()).await.cookie("sid");
    let response = server.get("/api/session").add_cookie(sid).await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["user"]["id"], "1");
    assert_eq!(json["user"]["full_name"], "John Doe");
    assert!(json["created_at"].is_string());

    let body = json.to_string();
    assert!(!body.contains("access-token-1"));
    assert!(!body.contains("refresh-token-1"));
}

#[tokio::test]
async fn test_refresh_replaces_access_token() {
    let (server, _store) = common::test_server(Arc::new(StubAuthGateway::new()));

    let sid = server.post("/login").form(&demo_form()).await.cookie("sid");
    let response = server.post("/api/session/refresh").add_cookie(sid.clone()).await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["refreshed"], true);
    assert_eq!(json["expires_in"], 3600);

    server
        .get("/api/session")
        .add_cookie(sid)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_rejected_refresh_clears_session() {
    let (server, store) = common::test_server(Arc::new(StubAuthGateway::rejecting_refresh()));

    let sid = server.post("/login").form(&demo_form()).await.cookie("sid");
    let response = server.post("/api/session/refresh").add_cookie(sid.clone()).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "Invalid refresh token"
    );
    assert!(store.is_empty().await);

    server
        .get("/api/session")
        .add_cookie(sid)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_without_session_is_unauthorized() {
    let (server, _store) = common::test_server(Arc::new(StubAuthGateway::new()));

    server
        .post("/api/session/refresh")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
