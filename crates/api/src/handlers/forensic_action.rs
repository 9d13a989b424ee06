//! Handlers for a case's forensic checklist (`/cases/{id}/actions`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use caseboard_core::activity::ENTITY_FORENSIC_ACTION;
use caseboard_core::error::CoreError;
use caseboard_core::forensic_action::{completion_state, find_template, validate_custom_action};
use caseboard_core::types::DbId;
use caseboard_db::models::forensic_action::{
    CreateForensicAction, ForensicAction, SetActionCompletion,
};
use caseboard_db::repositories::{CaseRepo, ForensicActionRepo};
use caseboard_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Resolve a create request into `(template_id, action_type, description)`.
///
/// A `template_id` takes precedence; otherwise both custom fields are
/// required.
fn resolve_action(
    input: &CreateForensicAction,
) -> Result<(Option<&'static str>, String, String), CoreError> {
    if let Some(template_id) = &input.template_id {
        let template = find_template(template_id).ok_or_else(|| {
            CoreError::Validation(format!("Unknown action template '{template_id}'"))
        })?;
        return Ok((
            Some(template.id),
            template.action_type.to_string(),
            template.description.to_string(),
        ));
    }

    let action_type = input.action_type.as_deref().unwrap_or("").trim();
    let description = input.description.as_deref().unwrap_or("").trim();
    validate_custom_action(action_type, description)?;
    Ok((None, action_type.to_string(), description.to_string()))
}

/// POST /api/v1/cases/{case_id}/actions
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(case_id): Path<DbId>,
    Json(input): Json<CreateForensicAction>,
) -> AppResult<(StatusCode, Json<ForensicAction>)> {
    let (template_id, action_type, description) = resolve_action(&input)?;

    CaseRepo::find_by_id(&state.pool, case_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Case", case_id)))?;

    let action = ForensicActionRepo::create(
        &state.pool,
        case_id,
        template_id,
        &action_type,
        &description,
        auth.user_id,
    )
    .await?;

    state.publish(
        ChangeEvent::created(ENTITY_FORENSIC_ACTION, action.id)
            .with_actor(auth.user_id)
            .with_payload(&action),
    );
    Ok((StatusCode::CREATED, Json(action)))
}

/// GET /api/v1/cases/{case_id}/actions
pub async fn list_by_case(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(case_id): Path<DbId>,
) -> AppResult<Json<Vec<ForensicAction>>> {
    CaseRepo::find_by_id(&state.pool, case_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Case", case_id)))?;

    let actions = ForensicActionRepo::list_by_case(&state.pool, case_id).await?;
    Ok(Json(actions))
}

/// PATCH /api/v1/cases/{case_id}/actions/{action_id}
///
/// Completing stamps `completed_at`; reopening clears it and resets the
/// status to pending.
pub async fn set_completion(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((case_id, action_id)): Path<(DbId, DbId)>,
    Json(input): Json<SetActionCompletion>,
) -> AppResult<Json<ForensicAction>> {
    let (status, completed_at) = completion_state(input.is_completed, chrono::Utc::now());

    let action = ForensicActionRepo::set_completed(
        &state.pool,
        case_id,
        action_id,
        input.is_completed,
        status.as_str(),
        completed_at,
    )
    .await?
    .ok_or(AppError::Core(CoreError::not_found("ForensicAction", action_id)))?;

    tracing::info!(
        action_id,
        case_id,
        is_completed = input.is_completed,
        "Checklist item toggled"
    );
    state.publish(
        ChangeEvent::updated(ENTITY_FORENSIC_ACTION, action.id)
            .with_actor(auth.user_id)
            .with_payload(&action),
    );
    Ok(Json(action))
}

/// DELETE /api/v1/cases/{case_id}/actions/{action_id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((case_id, action_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = ForensicActionRepo::delete(&state.pool, case_id, action_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("ForensicAction", action_id)));
    }

    state.publish(ChangeEvent::deleted(ENTITY_FORENSIC_ACTION, action_id).with_actor(auth.user_id));
    Ok(StatusCode::NO_CONTENT)
}
