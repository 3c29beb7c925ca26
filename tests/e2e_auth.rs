//! E2E tests for registration, login, and token enforcement

mod common;

use common::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn test_register_and_login_flow() {
    let server = TestServer::new().await;

    let response = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({
            "handle": "alice",
            "email": "alice@example.com",
            "password": "hunter2",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["id"].as_str().is_some());

    let response = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "handle": "alice", "password": "hunter2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_handle_rejected() {
    let server = TestServer::new().await;
    server.register_and_login("alice").await;

    let response = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({
            "handle": "alice",
            "email": "other@example.com",
            "password": "hunter2",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_login_wrong_password_rejected() {
    let server = TestServer::new().await;
    server.register_and_login("alice").await;

    let response = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "handle": "alice", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "handle": "nobody", "password": "hunter2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/api/posts/timeline"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = server
        .client
        .post(server.url("/api/posts"))
        .json(&json!({ "content": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = server
        .client
        .get(server.url("/api/posts/timeline"))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
