//! Handler for dashboard statistics.

use axum::extract::State;
use axum::Json;
use caseboard_core::dashboard::{build_stats, DashboardStats};
use caseboard_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let counts = DashboardRepo::load_counts(&state.pool).await?;
    Ok(Json(DataResponse {
        data: build_stats(&counts),
    }))
}
