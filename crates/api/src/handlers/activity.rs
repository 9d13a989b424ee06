//! Handler for the activity log (audit trail).

use axum::extract::{Query, State};
use axum::Json;
use caseboard_db::models::activity_log::{ActivityPage, ActivityQuery};
use caseboard_db::repositories::ActivityLogRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/activity?entity_type=&entity_id=&user_id=&limit=&offset=
///
/// Newest first. `limit` and `offset` are clamped rather than rejected.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ActivityQuery>,
) -> AppResult<Json<DataResponse<ActivityPage>>> {
    let page = ActivityLogRepo::query(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: page }))
}
