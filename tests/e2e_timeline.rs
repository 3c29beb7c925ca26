//! E2E tests for home and author timelines

mod common;

use common::TestServer;

#[tokio::test]
async fn test_home_timeline_follow_post_like_unlike() {
    let server = TestServer::new().await;

    let alice = server.register_and_login("alice").await;
    let bob = server.register_and_login("bob").await;
    let bob_id = server.account_id("bob").await;

    server.follow(&alice, &bob_id).await;
    server.create_post(&bob, "hello").await;
    let world_id = server.create_post(&bob, "world").await;

    // Newest first, both unliked from alice's point of view
    let timeline = server.get_json(&alice, "/api/posts/timeline?page=1").await;
    let posts = timeline.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["content"], "world");
    assert_eq!(posts[1]["content"], "hello");
    assert_eq!(posts[0]["liked"], false);
    assert_eq!(posts[1]["liked"], false);
    assert_eq!(posts[0]["author_handle"], "bob");

    // Like "world" and see the annotation and counter flip
    let response = server
        .client
        .post(server.url(&format!("/api/posts/{}/like", world_id)))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let timeline = server.get_json(&alice, "/api/posts/timeline?page=1").await;
    let posts = timeline.as_array().unwrap();
    assert_eq!(posts[0]["liked"], true);
    assert_eq!(posts[0]["like_count"], 1);
    assert_eq!(posts[1]["liked"], false);

    // Bob never liked anything, so his view stays unliked
    let timeline = server.get_json(&bob, "/api/posts/bob?page=1").await;
    let posts = timeline.as_array().unwrap();
    assert_eq!(posts[0]["liked"], false);
    assert_eq!(posts[0]["like_count"], 1);

    // Unlike returns the counter to zero
    let response = server
        .client
        .delete(server.url(&format!("/api/posts/{}/like", world_id)))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let timeline = server.get_json(&alice, "/api/posts/timeline?page=1").await;
    let posts = timeline.as_array().unwrap();
    assert_eq!(posts[0]["liked"], false);
    assert_eq!(posts[0]["like_count"], 0);
}

#[tokio::test]
async fn test_home_timeline_includes_own_posts_excludes_strangers() {
    let server = TestServer::new().await;

    let alice = server.register_and_login("alice").await;
    let _carol = server.register_and_login("carol").await;
    let carol = server.register_and_login("carol2").await;

    server.create_post(&alice, "my own post").await;
    server.create_post(&carol, "stranger post").await;

    let timeline = server.get_json(&alice, "/api/posts/timeline?page=1").await;
    let posts = timeline.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["content"], "my own post");
}

#[tokio::test]
async fn test_author_timeline_pagination() {
    let server = TestServer::new().await;

    let bob = server.register_and_login("bob").await;
    for i in 0..12 {
        server.create_post(&bob, &format!("post {}", i)).await;
    }

    let alice = server.register_and_login("alice").await;

    // Author pages hold 5 posts each
    let page1 = server.get_json(&alice, "/api/posts/bob?page=1").await;
    let page2 = server.get_json(&alice, "/api/posts/bob?page=2").await;
    let page3 = server.get_json(&alice, "/api/posts/bob?page=3").await;
    let page4 = server.get_json(&alice, "/api/posts/bob?page=4").await;

    assert_eq!(page1.as_array().unwrap().len(), 5);
    assert_eq!(page2.as_array().unwrap().len(), 5);
    assert_eq!(page3.as_array().unwrap().len(), 2);
    assert_eq!(page4.as_array().unwrap().len(), 0);

    assert_eq!(page1.as_array().unwrap()[0]["content"], "post 11");
    assert_eq!(page3.as_array().unwrap()[1]["content"], "post 0");
}

#[tokio::test]
async fn test_author_timeline_unknown_handle_is_empty() {
    let server = TestServer::new().await;
    let alice = server.register_and_login("alice").await;

    let timeline = server.get_json(&alice, "/api/posts/nobody?page=1").await;
    assert_eq!(timeline.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_timeline_page_zero_rejected() {
    let server = TestServer::new().await;
    let alice = server.register_and_login("alice").await;

    let response = server
        .client
        .get(server.url("/api/posts/timeline?page=0"))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
