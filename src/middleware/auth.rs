use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::database::models::Role;
use crate::error::ApiError;

/// Name of the cookie carrying the session token for browser clients.
pub const AUTH_COOKIE: &str = "auth-token";

/// Resolved caller for the current request, produced once by the gate and
/// threaded into handlers as an `Extension`.
#[derive(Clone, Debug)]
pub struct CallerIdentity {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub restricted: bool,
}

impl From<Claims> for CallerIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            restricted: claims.restricted,
        }
    }
}

/// Authentication middleware: validates the session token and injects the
/// caller identity. Rejects with a 401 envelope before any handler runs.
pub async fn caller_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::validate_jwt(&token)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    request.extensions_mut().insert(CallerIdentity::from(claims));
    Ok(next.run(request).await)
}

/// Role predicate for admin-only routes. Runs after `caller_middleware`;
/// a restricted flag blocks the route even for a valid admin session.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let caller = request
        .extensions()
        .get::<CallerIdentity>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if caller.role != Role::Admin {
        return Err(ApiError::forbidden("Admin role required"));
    }
    if caller.restricted {
        return Err(ApiError::forbidden("Account access is restricted"));
    }

    Ok(next.run(request).await)
}

/// Pull the session token from the `Authorization: Bearer` header, falling
/// back to the `auth-token` cookie set at login.
fn extract_token(headers: &HeaderMap) -> Result<String, String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| "Invalid Authorization header format".to_string())?;

        return match auth_str.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
            Some(_) => Err("Empty bearer token".to_string()),
            None => Err("Authorization header must use Bearer token format".to_string()),
        };
    }

    for cookie_header in headers.get_all(header::COOKIE) {
        let Ok(cookies) = cookie_header.to_str() else { continue };
        if let Some(token) = token_from_cookies(cookies) {
            return Ok(token);
        }
    }

    Err("Missing session token".to_string())
}

fn token_from_cookies(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("auth-token=def"));
        assert_eq!(extract_token(&headers).unwrap(), "abc");
    }

    #[test]
    fn cookie_token_is_found_among_others() {
        let token = token_from_cookies("theme=dark; auth-token=abc123; lang=en");
        assert_eq!(token.as_deref(), Some("abc123"));
    }

    #[test]
    fn cleared_cookie_is_not_a_session() {
        assert_eq!(token_from_cookies("auth-token="), None);
    }

    #[test]
    fn missing_token_is_an_error() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers).is_err());
    }
}
