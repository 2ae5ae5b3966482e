//! Authentication handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;

use crate::auth::{verify_password, Identity, TokenAuthority};
use crate::db::UserRepository;
use crate::web::dto::{LoginRequest, LoginResponse, MessageResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;
use crate::Database;

/// Message for any failed login, whichever check failed.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database pool.
    pub db: Database,
    /// Session token authority.
    pub tokens: Arc<TokenAuthority>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, tokens: Arc<TokenAuthority>) -> Self {
        Self { db, tokens }
    }

    /// Create a new application state signing with `jwt_secret`.
    pub fn with_secret(db: Database, jwt_secret: &str) -> Self {
        Self::new(db, Arc::new(TokenAuthority::new(jwt_secret.as_bytes())))
    }
}

/// POST /user/login - Exchange credentials for a session token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = repo.get_by_username(&req.username).await?;

    let user = match user {
        Some(user) if verify_password(&req.password, &user.password) => user,
        Some(_) => {
            tracing::info!(username = %req.username, "Login failed: wrong password");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
        None => {
            tracing::info!(username = %req.username, "Login failed: unknown user");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    let token = state
        .tokens
        .issue(&Identity::from(&user), Utc::now())
        .map_err(|e| {
            tracing::error!("Failed to issue session token: {}", e);
            ApiError::internal("Failed to generate token")
        })?;

    tracing::info!(username = %user.username, user_id = user.id, "User logged in");
    Ok(Json(LoginResponse { token }))
}

/// POST /user/logout - Acknowledge logout.
///
/// Sessions are stateless, so the token stays valid until it expires; the
/// client is expected to discard it.
pub async fn logout(user: AuthUser) -> Json<MessageResponse> {
    tracing::info!(username = %user.username, "User logged out");
    Json(MessageResponse::new("Logged out successfully"))
}
