// GET /announcements/active - current site-wide banner, if any
use axum::extract::State;

use crate::app::AppState;
use crate::database::models::Announcement;
use crate::middleware::{ApiResponse, ApiResult};

/// Public. `data` is the most recently updated live announcement, or `null`
/// when nothing is live - that is still a success, not a 404.
pub async fn active(State(state): State<AppState>) -> ApiResult<Option<Announcement>> {
    let announcement = state.store.active_announcement().await?;
    Ok(ApiResponse::success(announcement))
}
