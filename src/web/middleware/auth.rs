//! Bearer token access gate.
//!
//! Every protected route passes through [`require_session`], which moves a
//! request through header lookup, token extraction and validation before the
//! handler runs. The first failing step answers 401 and the handler is never
//! invoked. On success the caller's [`AuthUser`] is attached to the request
//! extensions, where handlers read it back with the `AuthUser` extractor.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::auth::{Identity, SessionClaims, TokenAuthority, TokenError};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Reasons the gate refuses a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// No `Authorization` header was sent.
    #[error("Authorization header required")]
    MissingCredentials,

    /// The header is unreadable or not a bearer credential.
    #[error("Bearer token required")]
    MalformedCredentials,

    /// The bearer token failed validation.
    #[error("Invalid token")]
    InvalidCredentials(TokenError),
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        ApiError::unauthorized(err.to_string())
    }
}

/// The authenticated caller of a protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Username from the session token.
    pub username: String,
    /// User ID from the session token, when it carries one.
    pub user_id: Option<i64>,
}

impl AuthUser {
    /// The identity this caller was issued a token for.
    pub fn identity(&self) -> Identity {
        Identity {
            username: self.username.clone(),
            user_id: self.user_id,
        }
    }
}

impl From<SessionClaims> for AuthUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            username: claims.username,
            user_id: claims.user_id,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            tracing::error!("Handler requires AuthUser but the route is not gated");
            ApiError::internal("User not found in context")
        })
    }
}

/// Decide whether an `Authorization` header value grants access at `now`.
///
/// Never touches the database.
pub fn authorize(
    header: Option<&HeaderValue>,
    tokens: &TokenAuthority,
    now: DateTime<Utc>,
) -> Result<AuthUser, GateError> {
    let header = header.ok_or(GateError::MissingCredentials)?;

    let value = header
        .to_str()
        .map_err(|_| GateError::MalformedCredentials)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(GateError::MalformedCredentials)?;

    let claims = tokens
        .validate(token, now)
        .map_err(GateError::InvalidCredentials)?;

    Ok(AuthUser::from(claims))
}

/// Middleware guarding routes that require a session.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request.headers().get(AUTHORIZATION);

    let user = match authorize(header, &state.tokens, Utc::now()) {
        Ok(user) => user,
        Err(GateError::InvalidCredentials(cause)) => {
            tracing::debug!(%cause, "Rejected session token");
            return Err(GateError::InvalidCredentials(cause).into());
        }
        Err(err) => {
            tracing::debug!("Rejected request: {}", err);
            return Err(err.into());
        }
    };

    tracing::debug!(username = %user.username, "Session authorized");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn authority() -> TokenAuthority {
        TokenAuthority::new(b"gate-test-secret")
    }

    fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
    }

    #[test]
    fn test_missing_header() {
        let result = authorize(None, &authority(), Utc::now());
        assert_eq!(result, Err(GateError::MissingCredentials));
    }

    #[test]
    fn test_not_bearer() {
        let tokens = authority();
        let now = Utc::now();
        let token = tokens.issue(&Identity::new("admin", 1), now).unwrap();

        for header in [
            HeaderValue::from_str(&token).unwrap(),
            HeaderValue::from_static("Basic YWRtaW46cGFzc3dvcmQxMjM="),
            HeaderValue::from_str(&format!("bearer {token}")).unwrap(),
            HeaderValue::from_static(""),
        ] {
            assert_eq!(
                authorize(Some(&header), &tokens, now),
                Err(GateError::MalformedCredentials)
            );
        }
    }

    #[test]
    fn test_non_ascii_header() {
        let header = HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap();
        assert_eq!(
            authorize(Some(&header), &authority(), Utc::now()),
            Err(GateError::MalformedCredentials)
        );
    }

    #[test]
    fn test_empty_bearer_token() {
        let header = HeaderValue::from_static("Bearer ");
        assert_eq!(
            authorize(Some(&header), &authority(), Utc::now()),
            Err(GateError::InvalidCredentials(TokenError::Malformed))
        );
    }

    #[test]
    fn test_valid_token() {
        let tokens = authority();
        let now = Utc::now();
        let token = tokens.issue(&Identity::new("admin", 1), now).unwrap();

        let user = authorize(Some(&bearer(&token)), &tokens, now).unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(user.user_id, Some(1));
        assert_eq!(user.identity(), Identity::new("admin", 1));
    }

    #[test]
    fn test_expired_token() {
        let tokens = authority();
        let issued = Utc::now() - Duration::hours(25);
        let token = tokens.issue(&Identity::new("admin", 1), issued).unwrap();

        assert_eq!(
            authorize(Some(&bearer(&token)), &tokens, Utc::now()),
            Err(GateError::InvalidCredentials(TokenError::Expired))
        );
    }

    #[test]
    fn test_foreign_key_token() {
        let now = Utc::now();
        let token = TokenAuthority::new(b"other-secret")
            .issue(&Identity::new("admin", 1), now)
            .unwrap();

        assert_eq!(
            authorize(Some(&bearer(&token)), &authority(), now),
            Err(GateError::InvalidCredentials(TokenError::BadSignature))
        );
    }

    #[test]
    fn test_gate_error_messages() {
        assert_eq!(
            GateError::MissingCredentials.to_string(),
            "Authorization header required"
        );
        assert_eq!(
            GateError::MalformedCredentials.to_string(),
            "Bearer token required"
        );
        assert_eq!(
            GateError::InvalidCredentials(TokenError::Expired).to_string(),
            "Invalid token"
        );

        let err: ApiError = GateError::InvalidCredentials(TokenError::BadSignature).into();
        assert_eq!(err.message(), "Invalid token");
    }
}
