//! Quillpost - a small blog backend
//!
//! Users log in with a username and password and receive a signed session
//! token. The token authorizes reading the caller's profile and publishing
//! posts; the post feed itself is public.

pub mod auth;
pub mod blog;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, hash_password_with, validate_password, verify_password, Identity,
    PasswordError, SessionClaims, TokenAuthority, TokenError, WorkFactor, SESSION_TTL_SECS,
};
pub use blog::{NewPost, Post, PostRepository, PostWithAuthor};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{BlogError, Result};
pub use web::{create_router, ApiError, AppState, WebServer};
