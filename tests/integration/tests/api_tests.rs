//! API Integration Tests
//!
//! Each test boots its own server on an ephemeral port with in-memory
//! storage.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chat_service::dto::{ActiveUsersResponse, HealthResponse, RegisterResponse};
use integration_tests::{assert_error, assert_json, Credentials, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/_health").await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_unknown_route() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/nope").await.unwrap();

    let body = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body["message"], "Resource not found: /nope");
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();

    let response = server.post("/user", &credentials).await.unwrap();
    let user: RegisterResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(user.user_name, credentials.user_name);
    assert!(!user.id.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_name() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();
    server.register(&credentials).await.unwrap();

    let response = server
        .post("/user", &credentials.with_password("another1"))
        .await
        .unwrap();

    let body = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body["message"], "user with provided name already exists");
}

#[tokio::test]
async fn test_register_validation() {
    let server = TestServer::start().await.expect("Failed to start server");

    let short_name = server
        .post("/user", &Credentials::new("ab", "secret123"))
        .await
        .unwrap();
    assert_error(short_name, StatusCode::BAD_REQUEST)
        .await
        .unwrap();

    let short_password = server
        .post("/user", &Credentials::new("abcdef", "12345"))
        .await
        .unwrap();
    assert_error(short_password, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_malformed_body() {
    let server = TestServer::start().await.expect("Failed to start server");
    let url = format!("{}/user", server.base_url());

    let response = server
        .client
        .post(&url)
        .header("content-type", "application/json")
        .body("{\"userName\":")
        .send()
        .await
        .unwrap();

    assert_error(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_returns_connect_url() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();
    server.register(&credentials).await.unwrap();

    let url = server.login(&credentials).await.unwrap();

    let prefix = format!("ws://{}/chat/ws.rtm.start?token=", server.addr);
    let token = url.strip_prefix(&prefix).expect("unexpected connect url");
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_login_twice_issues_distinct_tokens() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();
    server.register(&credentials).await.unwrap();

    let first = server.login(&credentials).await.unwrap();
    let second = server.login(&credentials).await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();
    server.register(&credentials).await.unwrap();

    let wrong_password = server
        .post("/user/login", &credentials.with_password("wrong-password"))
        .await
        .unwrap();
    let body = assert_error(wrong_password, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(
        body["message"],
        "Unable to log in user. Reason: Invalid creds"
    );

    let unknown_user = server
        .post("/user/login", &Credentials::unique())
        .await
        .unwrap();
    let body = assert_error(unknown_user, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(
        body["message"],
        "Unable to log in user. Reason: Invalid creds"
    );
}

#[tokio::test]
async fn test_login_missing_fields() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/user/login", &Credentials::new("", ""))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

// ============================================================================
// Active User Tests
// ============================================================================

#[tokio::test]
async fn test_active_users_empty() {
    let server = TestServer::start().await.expect("Failed to start server");

    assert_eq!(server.active_count().await.unwrap(), 0);

    let response = server.get("/user/active").await.unwrap();
    let active: ActiveUsersResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active.users.is_empty());
}
