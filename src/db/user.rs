//! User model for Quillpost.

use std::fmt;

use chrono::{DateTime, Utc};

/// A registered user.
///
/// The password hash is never serialized and is redacted from `Debug`.
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique, case-sensitive).
    pub username: String,
    /// Password hash (Argon2 PHC string).
    pub password: String,
    /// Display name.
    pub nickname: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("nickname", &self.nickname)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (already hashed).
    pub password: String,
    /// Display name.
    pub nickname: String,
}

impl NewUser {
    /// Create a new user record.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password_hash.into(),
            nickname: nickname.into(),
        }
    }
}
