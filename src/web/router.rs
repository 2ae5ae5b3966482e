//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{create_post, list_posts, login, logout, user_info, AppState};
use super::middleware::{create_cors_layer, require_session};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // The gate wraps single methods, so unsupported methods still get 405
    let gate = middleware::from_fn_with_state(app_state.clone(), require_session);

    let user_routes = Router::new()
        .route("/user/login", post(login))
        .route("/user/info", get(user_info).route_layer(gate.clone()))
        .route("/user/logout", post(logout).route_layer(gate.clone()));

    let post_routes = Router::new().route(
        "/posts",
        get(list_posts).merge(post(create_post).route_layer(gate)),
    );

    Router::new()
        .merge(user_routes)
        .merge(post_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
