//! Test helpers for Web API integration tests.
//!
//! Provides an axum-test server over an in-memory database, seeded with the
//! demo accounts, plus login and token helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use quillpost::db::seed_demo_users;
use quillpost::web::{create_health_router, create_router, AppState};
use quillpost::{Database, TokenAuthority, WorkFactor};

/// Signing secret used by every test server.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Argon2 parameters cheap enough for tests.
pub const CHEAP_FACTOR: WorkFactor = WorkFactor {
    memory_kib: 1024,
    iterations: 1,
    parallelism: 1,
};

/// A running test server and the state behind it.
pub struct TestApp {
    /// HTTP test server.
    pub server: TestServer,
    /// Database shared with the server.
    pub db: Database,
    /// Token authority shared with the server.
    pub tokens: Arc<TokenAuthority>,
}

/// Create a test server over an empty database.
pub async fn create_empty_app() -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let tokens = Arc::new(TokenAuthority::new(TEST_SECRET.as_bytes()));

    let app_state = Arc::new(AppState::new(db.clone(), tokens.clone()));
    let router = create_router(app_state, &[]).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, db, tokens }
}

/// Create a test server whose database holds the demo accounts.
pub async fn create_test_app() -> TestApp {
    let app = create_empty_app().await;
    seed_demo_users(&app.db, &CHEAP_FACTOR)
        .await
        .expect("Failed to seed demo users");
    app
}

/// Log in and return the issued token.
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/user/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["token"]
        .as_str()
        .expect("login response has no token")
        .to_string()
}

/// Format a bearer `Authorization` header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
