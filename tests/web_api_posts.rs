//! Web API Post Tests
//!
//! Integration tests for publishing posts and reading the public feed.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use common::{bearer, create_empty_app, create_test_app, login};
use quillpost::{Identity, NewUser, UserRepository};

/// Helper to publish a post and return the response body.
async fn create_post(server: &axum_test::TestServer, token: &str, content: &str) -> Value {
    let response = server
        .post("/posts")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({"content": content}))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

// ============================================================================
// Feed Tests
// ============================================================================

#[tokio::test]
async fn test_empty_feed() {
    let app = create_test_app().await;

    let response = app.server.get("/posts").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_empty_feed_without_users() {
    let app = create_empty_app().await;

    let response = app.server.get("/posts").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "[]");
}

#[tokio::test]
async fn test_feed_is_newest_first() {
    let app = create_test_app().await;
    let admin = login(&app.server, "admin", "password123").await;
    let user1 = login(&app.server, "user1", "mypassword").await;

    create_post(&app.server, &admin, "first").await;
    create_post(&app.server, &user1, "second").await;
    create_post(&app.server, &admin, "third").await;

    let response = app.server.get("/posts").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 3);

    let contents: Vec<&str> = posts
        .iter()
        .map(|p| p["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["third", "second", "first"]);

    let authors: Vec<&str> = posts
        .iter()
        .map(|p| p["author_nickname"].as_str().unwrap())
        .collect();
    assert_eq!(authors, vec!["管理员小张", "用户小李", "管理员小张"]);
}

#[tokio::test]
async fn test_feed_entry_shape() {
    let app = create_test_app().await;
    let token = login(&app.server, "admin", "password123").await;
    create_post(&app.server, &token, "hello").await;

    let body: Value = app.server.get("/posts").await.json();
    let entry = body[0].as_object().unwrap();

    let mut keys: Vec<&str> = entry.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["author_nickname", "content", "created_at", "id"]);

    let created_at = entry["created_at"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[tokio::test]
async fn test_feed_ignores_authorization() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/posts")
        .add_header(AUTHORIZATION, "Bearer invalid-token")
        .await;

    response.assert_status_ok();
}

// ============================================================================
// Create Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_success() {
    let app = create_test_app().await;
    let token = login(&app.server, "admin", "password123").await;

    let body = create_post(&app.server, &token, "hello").await;

    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["content"], "hello");
    assert_eq!(body["author_nickname"], "管理员小张");

    let created_at: DateTime<Utc> = body["created_at"].as_str().unwrap().parse().unwrap();
    assert!((Utc::now() - created_at).num_seconds().abs() < 60);

    let feed: Value = app.server.get("/posts").await.json();
    assert_eq!(feed[0]["id"], body["id"]);
    assert_eq!(feed[0]["content"], "hello");
}

#[tokio::test]
async fn test_create_post_keeps_content_verbatim() {
    let app = create_test_app().await;
    let token = login(&app.server, "user1", "mypassword").await;

    let content = "  第一行\n  second line  ";
    let body = create_post(&app.server, &token, content).await;

    assert_eq!(body["content"], content);
}

#[tokio::test]
async fn test_create_post_requires_session() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/posts")
        .json(&json!({"content": "hello"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "Authorization header required"})
    );

    let feed: Value = app.server.get("/posts").await.json();
    assert_eq!(feed, json!([]));
}

#[tokio::test]
async fn test_unsupported_method_without_session() {
    let app = create_test_app().await;

    app.server
        .put("/posts")
        .json(&json!({"content": "hello"}))
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    app.server
        .delete("/posts")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_create_post_rejects_blank_content() {
    let app = create_test_app().await;
    let token = login(&app.server, "admin", "password123").await;

    for content in ["", "   ", "\n\t"] {
        let response = app
            .server
            .post("/posts")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({"content": content}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Invalid request format"})
        );
    }
}

#[tokio::test]
async fn test_create_post_rejects_oversized_content() {
    let app = create_test_app().await;
    let token = login(&app.server, "admin", "password123").await;

    let response = app
        .server
        .post("/posts")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"content": "a".repeat(10_001)}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_post_rejects_invalid_json() {
    let app = create_test_app().await;
    let token = login(&app.server, "admin", "password123").await;

    let response = app
        .server
        .post("/posts")
        .add_header(AUTHORIZATION, bearer(&token))
        .text("{\"content\": ")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "Invalid request format"})
    );
}

#[tokio::test]
async fn test_create_post_rejects_wrong_field_type() {
    let app = create_test_app().await;
    let token = login(&app.server, "admin", "password123").await;

    let response = app
        .server
        .post("/posts")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"content": 42}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_post_for_deleted_user() {
    let app = create_test_app().await;
    let token = login(&app.server, "admin", "password123").await;

    sqlx::query("DELETE FROM users WHERE username = ?")
        .bind("admin")
        .execute(app.db.pool())
        .await
        .unwrap();

    let response = app
        .server
        .post("/posts")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"content": "ghost"}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({"error": "User not found"}));
}

#[tokio::test]
async fn test_deleting_user_removes_their_posts() {
    let app = create_test_app().await;
    let admin = login(&app.server, "admin", "password123").await;
    let user1 = login(&app.server, "user1", "mypassword").await;

    create_post(&app.server, &admin, "from admin").await;
    create_post(&app.server, &user1, "from user1").await;

    sqlx::query("DELETE FROM users WHERE username = ?")
        .bind("admin")
        .execute(app.db.pool())
        .await
        .unwrap();

    let feed: Value = app.server.get("/posts").await.json();
    assert_eq!(feed.as_array().unwrap().len(), 1);
    assert_eq!(feed[0]["content"], "from user1");
}

#[tokio::test]
async fn test_create_post_with_username_only_token() {
    let app = create_empty_app().await;
    let repo = UserRepository::new(app.db.pool());
    repo.create(&NewUser::new("writer", "unused-hash", "写作者"))
        .await
        .unwrap();

    let token = app
        .tokens
        .issue(&Identity::username_only("writer"), Utc::now())
        .unwrap();

    let body = create_post(&app.server, &token, "by name").await;
    assert_eq!(body["author_nickname"], "写作者");
}
