//! Demo account provisioning.

use tracing::info;

use super::{Database, NewUser, UserRepository};
use crate::auth::{hash_password_with, WorkFactor};
use crate::{BlogError, Result};

/// Demo accounts as `(username, password, nickname)`.
pub const DEMO_USERS: &[(&str, &str, &str)] = &[
    ("admin", "password123", "管理员小张"),
    ("user1", "mypassword", "用户小李"),
];

/// Create the demo accounts if the users table is empty.
///
/// Returns the number of accounts created.
pub async fn seed_demo_users(db: &Database, factor: &WorkFactor) -> Result<usize> {
    let repo = UserRepository::new(db.pool());

    if repo.count().await? > 0 {
        info!("Database already has users, skipping demo seed");
        return Ok(0);
    }

    info!("Seeding database with demo users");
    for (username, password, nickname) in DEMO_USERS {
        let hash = hash_password_with(password, factor)
            .map_err(|e| BlogError::Validation(format!("cannot hash demo password: {e}")))?;
        repo.create(&NewUser::new(*username, hash, *nickname))
            .await?;
        info!(username = %username, "Created demo user");
    }

    Ok(DEMO_USERS.len())
}
