//! User handlers.

use std::sync::Arc;

use axum::{extract::State, Json};

use super::AppState;
use crate::auth::Identity;
use crate::db::{User, UserRepository};
use crate::web::dto::UserInfoResponse;
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;
use crate::Database;

/// Look up the stored user a session identity refers to.
///
/// Resolves by user ID when the identity carries one, otherwise by username.
/// An identity whose user no longer exists is a 404.
pub(crate) async fn resolve_identity(db: &Database, identity: &Identity) -> Result<User, ApiError> {
    let repo = UserRepository::new(db.pool());
    let user = match identity.user_id {
        Some(id) => repo.get_by_id(id).await?,
        None => repo.get_by_username(&identity.username).await?,
    };

    user.ok_or_else(|| {
        tracing::warn!(username = %identity.username, "Session identity no longer exists");
        ApiError::not_found("User not found")
    })
}

/// GET /user/info - Current user's nickname.
pub async fn user_info(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> Result<Json<UserInfoResponse>, ApiError> {
    let user = resolve_identity(&state.db, &auth_user.identity()).await?;

    Ok(Json(UserInfoResponse {
        nick_name: user.nickname,
    }))
}
