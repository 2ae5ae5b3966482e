//! Response DTOs for Web API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::blog::PostWithAuthor;

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token.
    pub token: String,
}

/// Current user information.
#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    /// Display nickname.
    pub nick_name: String,
}

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Post in API responses.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// Post ID.
    pub id: i64,
    /// Post body.
    pub content: String,
    /// Author's nickname.
    pub author_nickname: String,
    /// Creation time (RFC 3339, UTC).
    pub created_at: DateTime<Utc>,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(post: PostWithAuthor) -> Self {
        Self {
            id: post.id,
            content: post.content,
            author_nickname: post.author_nickname,
            created_at: post.created_at,
        }
    }
}
