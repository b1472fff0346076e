// POST /auth/logout - clear the session cookie
use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::ApiResponse;

/// Overwrites the `auth-token` cookie with an immediately expiring empty
/// value. No auth required and always 200: logging out without a session is
/// not an error.
pub async fn logout() -> Result<Response, ApiError> {
    let cookie = super::auth_cookie("", 0);
    let cookie_value = header::HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    let mut response = ApiResponse::success(Value::Null)
        .with_message("Logged out")
        .into_response();
    response.headers_mut().append(header::SET_COOKIE, cookie_value);
    Ok(response)
}
