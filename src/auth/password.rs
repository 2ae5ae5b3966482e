//! Password hashing and verification for Quillpost.
//!
//! Uses Argon2id. The stored hash is a PHC string that carries its own salt
//! and cost parameters, so verification needs nothing but the hash.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;
use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    TooLong,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),
}

/// Argon2 cost parameters used when hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkFactor {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of iterations.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl WorkFactor {
    /// Production work factor: 64 MiB, 3 iterations, 4 lanes.
    pub const DEFAULT: WorkFactor = WorkFactor {
        memory_kib: 65536,
        iterations: 3,
        parallelism: 4,
    };

    /// Build Argon2 parameters, rejecting values Argon2 does not accept.
    pub fn params(&self) -> Result<Params, argon2::Error> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
    }
}

impl Default for WorkFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hash a password using Argon2id with the default work factor.
///
/// # Examples
///
/// ```
/// use quillpost::hash_password;
///
/// let hash = hash_password("my_secure_password").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with(password, &WorkFactor::DEFAULT)
}

/// Hash a password using Argon2id with an explicit work factor.
///
/// Returns a PHC-formatted hash string that includes the salt and parameters.
pub fn hash_password_with(password: &str, factor: &WorkFactor) -> Result<String, PasswordError> {
    validate_password(password)?;

    let params = factor
        .params()
        .map_err(|e| PasswordError::HashError(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Check a claimed password against a stored hash.
///
/// A stored hash that is not a valid PHC string never matches.
///
/// # Examples
///
/// ```
/// use quillpost::auth::{hash_password_with, verify_password, WorkFactor};
///
/// let factor = WorkFactor { memory_kib: 1024, iterations: 1, parallelism: 1 };
/// let hash = hash_password_with("my_secure_password", &factor).unwrap();
/// assert!(verify_password("my_secure_password", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// ```
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    // Cost parameters come from the parsed hash, not from the default instance.
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Validate password requirements for provisioning.
///
/// Checks:
/// - Minimum length: 8 characters
/// - Maximum length: 128 characters
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}
