//! Handler for the fixed checklist template set.

use axum::Json;
use caseboard_core::forensic_action::{ActionTemplate, ACTION_TEMPLATES};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

/// GET /api/v1/action-templates
pub async fn list(_auth: AuthUser) -> AppResult<Json<DataResponse<&'static [ActionTemplate]>>> {
    Ok(Json(DataResponse {
        data: ACTION_TEMPLATES,
    }))
}
