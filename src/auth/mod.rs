//! Authentication module for Quillpost.
//!
//! This module provides password hashing and verification, and the session
//! token authority that issues and validates signed bearer tokens.

mod password;
mod token;

pub use password::{
    hash_password, hash_password_with, validate_password, verify_password, PasswordError,
    WorkFactor, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use token::{Identity, SessionClaims, TokenAuthority, TokenError, SESSION_TTL_SECS};
