//! Handlers for the `/suspects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use caseboard_core::activity::ENTITY_SUSPECT;
use caseboard_core::error::CoreError;
use caseboard_core::suspect::validate_suspect_name;
use caseboard_core::types::DbId;
use caseboard_core::text::blank_to_none;
use caseboard_core::victim::validate_contact;
use caseboard_db::models::suspect::{CreateSuspect, Suspect, UpdateSuspect};
use caseboard_db::repositories::SuspectRepo;
use caseboard_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Normalize blank optional fields and validate a new suspect.
///
/// Shared with case linking and composite case creation.
pub(crate) fn prepare_create(input: &mut CreateSuspect) -> Result<(), CoreError> {
    input.name = input.name.trim().to_string();
    validate_suspect_name(&input.name)?;
    input.contact = blank_to_none(input.contact.take());
    input.address = blank_to_none(input.address.take());
    input.identification_number = blank_to_none(input.identification_number.take());
    input.notes = blank_to_none(input.notes.take());
    validate_contact(input.contact.as_deref())
}

/// POST /api/v1/suspects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateSuspect>,
) -> AppResult<(StatusCode, Json<Suspect>)> {
    prepare_create(&mut input)?;
    let suspect = SuspectRepo::create(&state.pool, &input, auth.user_id).await?;

    tracing::info!(suspect_id = suspect.id, user_id = auth.user_id, "Suspect created");
    state.publish(
        ChangeEvent::created(ENTITY_SUSPECT, suspect.id)
            .with_actor(auth.user_id)
            .with_payload(&suspect),
    );
    Ok((StatusCode::CREATED, Json(suspect)))
}

/// GET /api/v1/suspects
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<Vec<Suspect>>> {
    let suspects = SuspectRepo::list(&state.pool).await?;
    Ok(Json(suspects))
}

/// GET /api/v1/suspects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Suspect>> {
    let suspect = SuspectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Suspect", id)))?;
    Ok(Json(suspect))
}

/// PUT /api/v1/suspects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSuspect>,
) -> AppResult<Json<Suspect>> {
    if let Some(name) = &input.name {
        validate_suspect_name(name)?;
    }
    validate_contact(input.contact.as_deref())?;

    let suspect = SuspectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Suspect", id)))?;

    state.publish(
        ChangeEvent::updated(ENTITY_SUSPECT, suspect.id)
            .with_actor(auth.user_id)
            .with_payload(&suspect),
    );
    Ok(Json(suspect))
}

/// DELETE /api/v1/suspects/{id}
///
/// Also removes the suspect from every case it was linked to.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SuspectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Suspect", id)));
    }

    tracing::info!(suspect_id = id, user_id = auth.user_id, "Suspect deleted");
    state.publish(ChangeEvent::deleted(ENTITY_SUSPECT, id).with_actor(auth.user_id));
    Ok(StatusCode::NO_CONTENT)
}
