//! Post model for Quillpost.

use chrono::{DateTime, Utc};

/// A post as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// ID of the user who wrote the post.
    pub user_id: i64,
    /// Post body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A post joined with its author's nickname.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostWithAuthor {
    /// Unique post ID.
    pub id: i64,
    /// ID of the user who wrote the post.
    pub user_id: i64,
    /// Post body.
    pub content: String,
    /// Author's nickname at read time.
    pub author_nickname: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// ID of the user creating the post.
    pub user_id: i64,
    /// Post body.
    pub content: String,
}

impl NewPost {
    /// Create a new post with required fields.
    pub fn new(user_id: i64, content: impl Into<String>) -> Self {
        Self {
            user_id,
            content: content.into(),
        }
    }
}
