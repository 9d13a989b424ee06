//! Handlers linking suspects to a case (`/cases/{id}/suspects`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use caseboard_core::activity::ENTITY_CASE_SUSPECT;
use caseboard_core::error::CoreError;
use caseboard_core::types::DbId;
use caseboard_db::models::case_suspect::{
    CaseSuspect, CaseSuspectDetail, LinkCaseSuspect, UpdateCaseSuspect,
};
use caseboard_db::repositories::{CaseRepo, CaseSuspectRepo, SuspectRepo};
use caseboard_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::suspect;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Check that a link names exactly one of `suspect_id` / `suspect`, and
/// prepare the inline suspect if present.
///
/// Shared with composite case creation.
pub(crate) fn prepare_link(input: &mut LinkCaseSuspect) -> Result<(), CoreError> {
    match (&input.suspect_id, &mut input.suspect) {
        (Some(_), None) => Ok(()),
        (None, Some(new)) => suspect::prepare_create(new),
        (Some(_), Some(_)) => Err(CoreError::Validation(
            "Provide either suspect_id or suspect, not both".to_string(),
        )),
        (None, None) => Err(CoreError::Validation(
            "Each suspect entry needs suspect_id or suspect".to_string(),
        )),
    }
}

/// POST /api/v1/cases/{case_id}/suspects
///
/// Links an existing suspect, or creates one and links it.
pub async fn link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(case_id): Path<DbId>,
    Json(mut input): Json<LinkCaseSuspect>,
) -> AppResult<(StatusCode, Json<CaseSuspect>)> {
    prepare_link(&mut input)?;

    CaseRepo::find_by_id(&state.pool, case_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Case", case_id)))?;

    let involvement = input.involvement_level.map(|l| l.as_str());
    let relationship = input.relationship_to_case.as_deref();

    let link = if let Some(new) = &input.suspect {
        let (_, link) = CaseSuspectRepo::link_new_suspect(
            &state.pool,
            case_id,
            new,
            involvement,
            relationship,
            auth.user_id,
        )
        .await?;
        link
    } else {
        let suspect_id = input.suspect_id.unwrap_or_default();
        SuspectRepo::find_by_id(&state.pool, suspect_id)
            .await?
            .ok_or(AppError::Core(CoreError::not_found("Suspect", suspect_id)))?;
        CaseSuspectRepo::link(&state.pool, case_id, suspect_id, involvement, relationship).await?
    };

    tracing::info!(case_id, suspect_id = link.suspect_id, "Suspect linked to case");
    state.publish(
        ChangeEvent::created(ENTITY_CASE_SUSPECT, link.id)
            .with_actor(auth.user_id)
            .with_payload(&link),
    );
    Ok((StatusCode::CREATED, Json(link)))
}

/// GET /api/v1/cases/{case_id}/suspects
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(case_id): Path<DbId>,
) -> AppResult<Json<Vec<CaseSuspectDetail>>> {
    CaseRepo::find_by_id(&state.pool, case_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Case", case_id)))?;

    let suspects = SuspectRepo::list_for_case(&state.pool, case_id).await?;
    Ok(Json(suspects))
}

/// PUT /api/v1/cases/{case_id}/suspects/{suspect_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((case_id, suspect_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCaseSuspect>,
) -> AppResult<Json<CaseSuspect>> {
    let link = CaseSuspectRepo::update(&state.pool, case_id, suspect_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("CaseSuspect", suspect_id)))?;

    state.publish(
        ChangeEvent::updated(ENTITY_CASE_SUSPECT, link.id)
            .with_actor(auth.user_id)
            .with_payload(&link),
    );
    Ok(Json(link))
}

/// DELETE /api/v1/cases/{case_id}/suspects/{suspect_id}
///
/// Removes the link only; the suspect record is kept.
pub async fn unlink(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((case_id, suspect_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let link_id = CaseSuspectRepo::unlink(&state.pool, case_id, suspect_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("CaseSuspect", suspect_id)))?;

    state.publish(
        ChangeEvent::deleted(ENTITY_CASE_SUSPECT, link_id)
            .with_actor(auth.user_id)
            .with_payload(&serde_json::json!({ "case_id": case_id, "suspect_id": suspect_id })),
    );
    Ok(StatusCode::NO_CONTENT)
}
