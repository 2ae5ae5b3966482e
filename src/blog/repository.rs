//! Post repository for Quillpost.

use chrono::Utc;
use sqlx::SqlitePool;

use super::post::{NewPost, Post, PostWithAuthor};
use crate::{BlogError, Result};

const SELECT_WITH_AUTHOR: &str = "SELECT p.id, p.user_id, p.content, u.nickname AS author_nickname, p.created_at
     FROM posts p
     INNER JOIN users u ON u.id = p.user_id";

/// Repository for post operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// Returns the created post with the assigned ID.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let result = sqlx::query("INSERT INTO posts (user_id, content, created_at) VALUES (?, ?, ?)")
            .bind(new_post.user_id)
            .bind(&new_post.content)
            .bind(Utc::now())
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BlogError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, user_id, content, created_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }

    /// Get a post by ID together with its author's nickname.
    pub async fn get_with_author(&self, id: i64) -> Result<Option<PostWithAuthor>> {
        let sql = format!("{SELECT_WITH_AUTHOR} WHERE p.id = ?");
        let post = sqlx::query_as::<_, PostWithAuthor>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(post)
    }

    /// List all posts with author nicknames, newest first.
    pub async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>> {
        let sql = format!("{SELECT_WITH_AUTHOR} ORDER BY p.created_at DESC, p.id DESC");
        let posts = sqlx::query_as::<_, PostWithAuthor>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(posts)
    }
}
