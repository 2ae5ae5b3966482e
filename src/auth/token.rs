//! Session token issuance and validation.
//!
//! Tokens are HS256 JSON Web Tokens signed with a single process-wide secret.
//! They are self-contained: validation never consults a store, so a token
//! stays valid until it expires.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::User;

/// Session lifetime in seconds (24 hours).
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token issuance and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The string is not a three-segment token or its segments do not decode.
    #[error("malformed token")]
    Malformed,

    /// The signature does not match the signing key.
    #[error("bad token signature")]
    BadSignature,

    /// The token is past its expiry.
    #[error("token expired")]
    Expired,

    /// The token was issued after the verifying clock.
    #[error("token not yet valid")]
    NotYetValid,

    /// Required claims are absent or have the wrong shape.
    #[error("invalid token claims")]
    InvalidClaims,

    /// Signing failed while issuing a token.
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::ImmatureSignature => TokenError::NotYetValid,
            ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
            _ => TokenError::Malformed,
        }
    }
}

/// The identity a session token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Login username.
    pub username: String,
    /// Numeric user ID, when known.
    pub user_id: Option<i64>,
}

impl Identity {
    /// Identity carrying both username and numeric ID.
    pub fn new(username: impl Into<String>, user_id: i64) -> Self {
        Self {
            username: username.into(),
            user_id: Some(user_id),
        }
    }

    /// Identity carrying only a username.
    pub fn username_only(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            user_id: None,
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(user.username.clone(), user.id)
    }
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Username (mandatory).
    pub username: String,
    /// Numeric user ID (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Issued-at, UNIX seconds.
    pub iat: i64,
    /// Expires-at, UNIX seconds.
    pub exp: i64,
    /// Random token ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl SessionClaims {
    /// The identity these claims were issued for.
    pub fn identity(&self) -> Identity {
        Identity {
            username: self.username.clone(),
            user_id: self.user_id,
        }
    }
}

/// Issues and validates session tokens with one signing key.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenAuthority {
    /// Create an authority from the shared signing secret.
    pub fn new(secret: &[u8]) -> Self {
        // Time checks run against the caller's clock in `validate`.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token valid from `now` for [`SESSION_TTL_SECS`].
    pub fn issue(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = SessionClaims {
            username: identity.username.clone(),
            user_id: identity.user_id,
            iat,
            exp: iat + SESSION_TTL_SECS,
            jti: Some(uuid::Uuid::new_v4().to_string()),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Validate a token against the clock reading `now`.
    ///
    /// The signature is checked before any segment is parsed, so an altered
    /// token is rejected as [`TokenError::BadSignature`].
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(TokenError::Malformed);
        }

        let signed_len = segments[0].len() + 1 + segments[1].len();
        let verified = jsonwebtoken::crypto::verify(
            segments[2],
            token[..signed_len].as_bytes(),
            &self.decoding_key,
            ALGORITHM,
        )
        .unwrap_or(false);
        if !verified {
            return Err(TokenError::BadSignature);
        }

        let data = decode::<serde_json::Value>(token, &self.decoding_key, &self.validation)?;
        let claims: SessionClaims =
            serde_json::from_value(data.claims).map_err(|_| TokenError::InvalidClaims)?;
        let lifetime = claims.exp.checked_sub(claims.iat);
        if claims.username.is_empty() || lifetime != Some(SESSION_TTL_SECS) {
            return Err(TokenError::InvalidClaims);
        }

        let now = now.timestamp();
        if now < claims.iat {
            return Err(TokenError::NotYetValid);
        }
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}
