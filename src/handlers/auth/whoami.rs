// GET /api/auth/whoami - echo the resolved caller identity
use axum::extract::Extension;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, CallerIdentity};

pub async fn whoami(Extension(caller): Extension<CallerIdentity>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "id": caller.id,
        "email": caller.email,
        "role": caller.role,
        "restricted": caller.restricted,
    })))
}
