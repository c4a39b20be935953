//! Gateway Integration Tests
//!
//! Login, upgrade, and message exchange over real WebSocket connections.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use chat_service::dto::ActiveUsersResponse;
use integration_tests::{assert_error, assert_json, ChatClient, Credentials, TestServer};
use reqwest::StatusCode;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Connect Tests
// ============================================================================

#[tokio::test]
async fn test_connect_without_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/chat/ws.rtm.start").await.unwrap();

    let body = assert_error(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(body["message"], "Query parameter 'token' is missing");
}

#[tokio::test]
async fn test_connect_with_unknown_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/chat/ws.rtm.start?token=not-a-token")
        .await
        .unwrap();

    let body = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body["message"], "token not found");
}

#[tokio::test]
async fn test_connect_url_is_single_use() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();
    let user = server.register(&credentials).await.unwrap();
    let url = server.login(&credentials).await.unwrap();

    let client = ChatClient::connect(&url).await.unwrap();
    server.wait_for_active(1).await.unwrap();

    let response = server.get("/user/active").await.unwrap();
    let active: ActiveUsersResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(active.users, vec![format!("{}-{}", user.id, user.user_name)]);

    match ChatClient::connect(&url).await {
        Err(e) => match e.downcast_ref::<WsError>() {
            Some(WsError::Http(response)) => assert_eq!(response.status(), StatusCode::FORBIDDEN),
            other => panic!("unexpected error: {other:?}"),
        },
        Ok(_) => panic!("a redeemed token must not connect again"),
    }

    client.close().await.unwrap();
    server.wait_for_active(0).await.unwrap();
}

// ============================================================================
// Messaging Tests
// ============================================================================

#[tokio::test]
async fn test_message_exchange() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_alice, mut alice_ws) = server.connect_new_user().await.unwrap();
    let (_bob, mut bob_ws) = server.connect_new_user().await.unwrap();
    server.wait_for_active(2).await.unwrap();

    alice_ws.send("hi").await.unwrap();
    assert_eq!(bob_ws.recv().await.unwrap(), "hi");

    bob_ws.send("hello alice").await.unwrap();
    assert_eq!(alice_ws.recv().await.unwrap(), "hello alice");
}

#[tokio::test]
async fn test_broadcast_skips_sender() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_a, mut a_ws) = server.connect_new_user().await.unwrap();
    let (_b, mut b_ws) = server.connect_new_user().await.unwrap();
    let (_c, mut c_ws) = server.connect_new_user().await.unwrap();
    server.wait_for_active(3).await.unwrap();

    a_ws.send("from a").await.unwrap();
    assert_eq!(b_ws.recv().await.unwrap(), "from a");
    assert_eq!(c_ws.recv().await.unwrap(), "from a");

    // The next thing A sees is B's reply, not its own message
    b_ws.send("from b").await.unwrap();
    assert_eq!(a_ws.recv().await.unwrap(), "from b");
}

#[tokio::test]
async fn test_offline_user_receives_backlog() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_alice, mut alice_ws) = server.connect_new_user().await.unwrap();

    let bob = Credentials::unique();
    server.register(&bob).await.unwrap();
    server.wait_for_active(1).await.unwrap();

    alice_ws.send("first").await.unwrap();
    alice_ws.send("second").await.unwrap();

    // Let the session persist both copies before bob shows up
    tokio::time::sleep(Duration::from_millis(200)).await;

    let url = server.login(&bob).await.unwrap();
    let mut bob_ws = ChatClient::connect(&url).await.unwrap();

    assert_eq!(bob_ws.recv().await.unwrap(), "first");
    assert_eq!(bob_ws.recv().await.unwrap(), "second");
}

#[tokio::test]
async fn test_disconnect_deregisters() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_alice, alice_ws) = server.connect_new_user().await.unwrap();
    let (_bob, mut bob_ws) = server.connect_new_user().await.unwrap();
    server.wait_for_active(2).await.unwrap();

    alice_ws.close().await.unwrap();
    server.wait_for_active(1).await.unwrap();

    bob_ws.send("anyone?").await.unwrap();
    server.wait_for_active(1).await.unwrap();
}
