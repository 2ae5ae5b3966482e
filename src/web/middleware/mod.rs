//! Middleware for Web API.

pub mod auth;
pub mod cors;

pub use auth::{authorize, require_session, AuthUser, GateError};
pub use cors::create_cors_layer;
