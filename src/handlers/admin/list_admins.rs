// GET /api/users/admins - minimal projection of admin accounts
use axum::extract::State;

use crate::app::AppState;
use crate::database::models::AdminSummary;
use crate::middleware::{ApiResponse, ApiResult};

/// Admin-gated. Returns only `{ id, email, name }` per account; credential
/// fields are absent from the projection itself, not filtered here.
pub async fn list_admins(State(state): State<AppState>) -> ApiResult<Vec<AdminSummary>> {
    let admins = state.store.list_admins().await?;
    Ok(ApiResponse::success(admins))
}
