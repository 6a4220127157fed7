//! CORS middleware configuration for cross-origin requests.
//!
//! The web front end is served from its own port, so every origin is
//! accepted with credentials. Verbs and headers are a fixed list.

use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Preflight cache lifetime in seconds
const CORS_MAX_AGE: usize = 3600;

/// Creates the CORS middleware applied to every route.
///
/// Allows:
/// - any origin, with credentials
/// - methods POST, GET, PUT, PATCH, DELETE
/// - headers Origin, Authorization, Content-Type, Accept, User-Agent, Cache-Control
///
/// and exposes `Content-Length` to scripts.
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::ORIGIN,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::USER_AGENT,
            header::CACHE_CONTROL,
        ])
        .expose_headers(vec![header::CONTENT_LENGTH])
        .supports_credentials()
        .max_age(CORS_MAX_AGE)
}

pub fn allowed_methods() -> Vec<Method> {
    vec![Method::POST, Method::GET, Method::PUT, Method::PATCH, Method::DELETE]
}
