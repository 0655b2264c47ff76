use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use task_management_frontend::domain::repositories::{AuthGateway, DEFAULT_LOGIN_ERROR};
use task_management_frontend::infrastructure::auth_api::{AuthClientConfig, HttpAuthClient};

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(Json(body): Json<LoginBody>) -> impl IntoResponse {
    match (body.email.as_str(), body.password.as_str()) {
        ("john.doe@example.com", "SecurePass123") => (
            StatusCode::OK,
            Json(json!({
                "message": "Login successful",
                "user": {
                    "id": "1",
                    "full_name": "John Doe",
                    "email": "john.doe@example.com",
                    "role": "admin",
                    "department": "Engineering"
                },
                "access_token": "access-token-1",
                "refresh_token": "refresh-token-1",
                "token_type": "Bearer",
                "expires_in": 3600
            })),
        )
            .into_response(),
        ("nested@example.com", _) => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"code": "forbidden", "message": "Account is disabled"}})),
        )
            .into_response(),
        ("crash@example.com", _) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response()
        }
        ("garbled@example.com", _) => (StatusCode::OK, "not json").into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid email or password"})),
        )
            .into_response(),
    }
}

async fn refresh(headers: HeaderMap) -> impl IntoResponse {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if bearer == "Bearer refresh-token-1" {
        (
            StatusCode::OK,
            Json(json!({"access_token": "access-token-2", "expires_in": 3600})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid refresh token"})),
        )
    }
}

async fn logout(headers: HeaderMap) -> StatusCode {
    if headers.contains_key(AUTHORIZATION) {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    }
}

/// Serves a fake backend under `/api/auth/*` and returns its API root.
async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api")
}

fn client(base_url: String) -> HttpAuthClient {
    HttpAuthClient::new(&AuthClientConfig {
        base_url,
        timeout: Duration::from_secs(5),
        max_retries: 0,
    })
    .unwrap()
}

#[tokio::test]
async fn test_login_success_returns_user_and_tokens() {
    let client = client(spawn_backend().await);

    let response = client
        .login("john.doe@example.com", "SecurePass123")
        .await
        .unwrap();

    assert_eq!(response.user.id, "1");
    assert_eq!(response.user.display_name(), "John Doe");
    assert_eq!(response.user.extra["department"], "Engineering");
    assert_eq!(response.access_token, "access-token-1");
    assert_eq!(response.refresh_token, "refresh-token-1");
    assert_eq!(response.expires_in, Some(3600));
}

#[tokio::test]
async fn test_login_surfaces_backend_message() {
    let client = client(spawn_backend().await);

    let err = client
        .login("john.doe@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Invalid email or password");

    let err = client.login("nested@example.com", "x").await.unwrap_err();
    assert_eq!(err.message(), "Account is disabled");
}

#[tokio::test]
async fn test_login_unreadable_responses_are_generic() {
    let client = client(spawn_backend().await);

    let err = client.login("crash@example.com", "x").await.unwrap_err();
    assert_eq!(err.message(), DEFAULT_LOGIN_ERROR);

    let err = client.login("garbled@example.com", "x").await.unwrap_err();
    assert_eq!(err.message(), DEFAULT_LOGIN_ERROR);
}

#[tokio::test]
async fn test_login_unreachable_backend_is_generic() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpAuthClient::new(&AuthClientConfig {
        base_url: format!("http://{addr}/api"),
        timeout: Duration::from_secs(2),
        max_retries: 1,
    })
    .unwrap();

    let err = client
        .login("john.doe@example.com", "SecurePass123")
        .await
        .unwrap_err();
    assert_eq!(err.message(), DEFAULT_LOGIN_ERROR);
}

#[tokio::test]
async fn test_refresh_sends_bearer_token() {
    let client = client(spawn_backend().await);

    let refreshed = client.refresh("refresh-token-1").await.unwrap();
    assert_eq!(refreshed.access_token, "access-token-2");
    assert_eq!(refreshed.expires_in, Some(3600));

    let err = client.refresh("stale").await.unwrap_err();
    assert_eq!(err.message(), "Invalid refresh token");
}

#[tokio::test]
async fn test_logout_sends_bearer_token() {
    let client = client(spawn_backend().await);

    assert!(client.logout("access-token-1").await.is_ok());
}

#[tokio::test]
async fn test_base_url_without_trailing_slash_keeps_prefix() {
    let base = spawn_backend().await;
    assert!(!base.ends_with('/'));

    let client = client(base.clone());
    let endpoint = client.endpoint("auth/login").unwrap();

    assert_eq!(endpoint.as_str(), format!("{base}/auth/login"));
}
