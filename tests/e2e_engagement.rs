//! E2E tests for likes and replies

mod common;

use common::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_like_is_idempotent_over_http() {
    let server = TestServer::new().await;

    let alice = server.register_and_login("alice").await;
    let bob = server.register_and_login("bob").await;
    let post_id = server.create_post(&bob, "likeable").await;

    for _ in 0..3 {
        let response = server
            .client
            .post(server.url(&format!("/api/posts/{}/like", post_id)))
            .bearer_auth(&alice)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    let timeline = server.get_json(&alice, "/api/posts/bob?page=1").await;
    assert_eq!(timeline.as_array().unwrap()[0]["like_count"], 1);
}

#[tokio::test]
async fn test_unlike_is_idempotent_over_http() {
    let server = TestServer::new().await;

    let alice = server.register_and_login("alice").await;
    let bob = server.register_and_login("bob").await;
    let post_id = server.create_post(&bob, "likeable").await;

    server
        .client
        .post(server.url(&format!("/api/posts/{}/like", post_id)))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();

    for _ in 0..3 {
        let response = server
            .client
            .delete(server.url(&format!("/api/posts/{}/like", post_id)))
            .bearer_auth(&alice)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    let timeline = server.get_json(&alice, "/api/posts/bob?page=1").await;
    assert_eq!(timeline.as_array().unwrap()[0]["like_count"], 0);
}

#[tokio::test]
async fn test_like_unknown_post_not_found() {
    let server = TestServer::new().await;
    let alice = server.register_and_login("alice").await;

    let response = server
        .client
        .post(server.url("/api/posts/01ARZ3NDEKTSV4RRFFQ69G5FAV/like"))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_concurrent_likes_from_distinct_accounts() {
    let server = TestServer::new().await;

    let alice = server.register_and_login("alice").await;
    let bob = server.register_and_login("bob").await;
    let carol = server.register_and_login("carol").await;
    let post_id = server.create_post(&bob, "popular").await;

    let like = |token: String| {
        let client = server.client.clone();
        let url = server.url(&format!("/api/posts/{}/like", post_id));
        async move { client.post(url).bearer_auth(token).send().await.unwrap() }
    };

    let (a, b, c) = tokio::join!(
        like(alice.clone()),
        like(bob.clone()),
        like(carol.clone())
    );
    assert_eq!(a.status(), 200);
    assert_eq!(b.status(), 200);
    assert_eq!(c.status(), 200);

    let timeline = server.get_json(&alice, "/api/posts/bob?page=1").await;
    assert_eq!(timeline.as_array().unwrap()[0]["like_count"], 3);
}

#[tokio::test]
async fn test_reply_links_parent_and_bumps_counter() {
    let server = TestServer::new().await;

    let alice = server.register_and_login("alice").await;
    let bob = server.register_and_login("bob").await;
    let parent_id = server.create_post(&bob, "original").await;

    let response = server
        .client
        .post(server.url("/api/posts"))
        .bearer_auth(&alice)
        .json(&json!({ "content": "a reply", "parent_post_id": parent_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let timeline = server.get_json(&bob, "/api/posts/bob?page=1").await;
    let posts = timeline.as_array().unwrap();
    assert_eq!(posts[0]["reply_count"], 1);
    assert_eq!(posts[0]["is_reply"], false);

    let timeline = server.get_json(&bob, "/api/posts/alice?page=1").await;
    let posts = timeline.as_array().unwrap();
    assert_eq!(posts[0]["is_reply"], true);
    assert_eq!(posts[0]["parent_post_id"], parent_id);
}

#[tokio::test]
async fn test_reply_to_unknown_post_not_found() {
    let server = TestServer::new().await;
    let alice = server.register_and_login("alice").await;

    let response = server
        .client
        .post(server.url("/api/posts"))
        .bearer_auth(&alice)
        .json(&json!({
            "content": "orphan reply",
            "parent_post_id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_empty_post_content_rejected() {
    let server = TestServer::new().await;
    let alice = server.register_and_login("alice").await;

    let response = server
        .client
        .post(server.url("/api/posts"))
        .bearer_auth(&alice)
        .json(&json!({ "content": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
