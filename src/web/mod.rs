//! Web API module for Quillpost.
//!
//! This module provides the JSON HTTP surface: login and session endpoints
//! under `/user`, the post feed under `/posts`, and a `/health` check.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
