//! CORS middleware configuration.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// How long browsers may cache a preflight answer.
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Create a CORS layer from the configured origin list.
///
/// Listed origins get credentialed access; an empty or unusable list falls
/// back to any origin without credentials.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed_origins.is_empty() {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_origin(Any)
    } else {
        // Credentials forbid wildcards, so every list stays explicit here
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([ORIGIN, CONTENT_TYPE, AUTHORIZATION])
            .expose_headers([CONTENT_LENGTH])
            .allow_credentials(true)
            .allow_origin(parsed_origins)
            .max_age(PREFLIGHT_MAX_AGE)
    }
}
