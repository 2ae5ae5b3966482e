//! API handlers.

pub mod auth;
pub mod posts;
pub mod user;

pub use auth::*;
pub use posts::*;
pub use user::user_info;
