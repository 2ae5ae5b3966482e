//! Request DTOs for Web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::not_empty_trimmed;
use crate::auth::MAX_PASSWORD_LENGTH;

/// Maximum username length accepted at login, in characters.
pub const MAX_USERNAME_LENGTH: u64 = 64;

/// Maximum password length accepted at login, in characters.
pub const MAX_LOGIN_PASSWORD_LENGTH: u64 = MAX_PASSWORD_LENGTH as u64;

/// Maximum post length, in characters.
pub const MAX_CONTENT_LENGTH: u64 = 10_000;

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, max = MAX_LOGIN_PASSWORD_LENGTH))]
    pub password: String,
}

/// Post creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post body, stored as sent.
    #[validate(
        length(max = MAX_CONTENT_LENGTH),
        custom(function = "not_empty_trimmed")
    )]
    pub content: String,
}
