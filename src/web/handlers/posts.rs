//! Post handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::user::resolve_identity;
use super::AppState;
use crate::blog::{NewPost, PostRepository};
use crate::web::dto::{CreatePostRequest, PostResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// POST /posts - Publish a post as the current user.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let user = resolve_identity(&state.db, &auth_user.identity()).await?;

    let repo = PostRepository::new(state.db.pool());
    let post = repo
        .create(&NewPost::new(user.id, req.content))
        .await
        .map_err(|e| {
            tracing::error!("Failed to create post: {}", e);
            ApiError::internal("Failed to create post")
        })?;

    let post = repo
        .get_with_author(post.id)
        .await?
        .ok_or_else(|| ApiError::internal("Failed to create post"))?;

    tracing::info!(post_id = post.id, user_id = user.id, "Post created");
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// GET /posts - Public feed, newest first.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let repo = PostRepository::new(state.db.pool());
    let posts = repo.list_with_authors().await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}
