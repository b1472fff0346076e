// POST /auth/login - authenticate and receive the session token
use axum::{
    extract::{Json, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;
use crate::handlers::require_str;
use crate::middleware::ApiResponse;

/// Validates credentials against the stored digest and issues a JWT, both as
/// an `auth-token` cookie for browser clients and in the response body for
/// API clients. A successful login resets the failed-attempt counter; a
/// failed one bumps it, restricting the account once it reaches the
/// configured limit. Restricted accounts are refused before any password
/// check.
pub async fn login(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Response, ApiError> {
    let Json(body) = body.ok_or_else(|| ApiError::validation_error("Request body must be JSON"))?;
    let email = require_str(&body, "email")?;
    // Passwords are matched byte-for-byte against the stored digest, so the
    // value must not be trimmed the way other fields are.
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation_error("password is required"))?;

    let account = state
        .store
        .account_by_email(email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if account.restricted {
        return Err(ApiError::forbidden("Account access is restricted"));
    }

    if !auth::verify_password(password, &account.password_hash) {
        let max_failed = config::config().security.max_failed_attempts;
        if let Err(e) = state.store.record_failed_login(account.id, max_failed).await {
            tracing::warn!("failed to record failed login for {}: {}", account.id, e);
        }
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let account = state.store.clear_failed_logins(account.id).await?;

    let claims = Claims::for_account(&account);
    let token = auth::generate_jwt(&claims)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    let expires_in = config::config().security.jwt_expiry_hours as i64 * 3600;
    let cookie = super::auth_cookie(&token, expires_in);
    let cookie_value = header::HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    tracing::info!(account = %account.id, "login succeeded");

    let mut response = ApiResponse::success(json!({
        "token": token,
        "account": account,
        "expires_in": expires_in,
    }))
    .into_response();
    response.headers_mut().append(header::SET_COOKIE, cookie_value);
    Ok(response)
}
