//! HTTP middleware

pub mod identity;

pub use identity::IdentityMiddleware;

use actix_web::http::header::HeaderMap;

/// Extract a bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Routes reachable without a resolved identity
pub fn is_public_route(path: &str) -> bool {
    matches!(path, "/health" | "/api/auth/login")
}
