// POST /api/admin/unlock-account - reset a customer's failed attempts
use axum::extract::{Extension, Json, State};
use serde_json::Value;
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::Account;
use crate::error::ApiError;
use crate::handlers::require_str;
use crate::middleware::{ApiResponse, ApiResult, CallerIdentity};

/// Admin-gated. Zeroes the failed-attempt counter and clears the restriction
/// flag on the named account. Unlocking an already-unlocked account is a
/// no-op success; an unknown id is 404.
pub async fn unlock_account(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    body: Option<Json<Value>>,
) -> ApiResult<Account> {
    let Json(body) = body.ok_or_else(|| ApiError::validation_error("Request body must be JSON"))?;
    let customer_id = require_str(&body, "customerId")?;
    let customer_id = Uuid::parse_str(customer_id)
        .map_err(|_| ApiError::validation_error("customerId must be a valid UUID"))?;

    let account = state.store.unlock_account(customer_id).await?;

    tracing::info!(admin = %caller.id, customer = %customer_id, "account unlocked");
    Ok(ApiResponse::success(account))
}
