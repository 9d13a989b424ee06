//! Handlers for the `/victims` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use caseboard_core::activity::ENTITY_VICTIM;
use caseboard_core::error::CoreError;
use caseboard_core::types::DbId;
use caseboard_core::text::blank_to_none;
use caseboard_core::victim::{validate_contact, validate_victim_name};
use caseboard_db::models::victim::{CreateVictim, UpdateVictim, Victim};
use caseboard_db::repositories::VictimRepo;
use caseboard_events::ChangeEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Normalize blank optional fields and validate a new victim.
///
/// Shared with composite case creation.
pub(crate) fn prepare_create(input: &mut CreateVictim) -> Result<(), CoreError> {
    input.name = input.name.trim().to_string();
    validate_victim_name(&input.name)?;
    input.contact = blank_to_none(input.contact.take());
    input.location = blank_to_none(input.location.take());
    input.address = blank_to_none(input.address.take());
    input.description = blank_to_none(input.description.take());
    validate_contact(input.contact.as_deref())
}

/// POST /api/v1/victims
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateVictim>,
) -> AppResult<(StatusCode, Json<Victim>)> {
    prepare_create(&mut input)?;
    let victim = VictimRepo::create(&state.pool, &input, auth.user_id).await?;

    tracing::info!(victim_id = victim.id, user_id = auth.user_id, "Victim created");
    state.publish(
        ChangeEvent::created(ENTITY_VICTIM, victim.id)
            .with_actor(auth.user_id)
            .with_payload(&victim),
    );
    Ok((StatusCode::CREATED, Json(victim)))
}

/// GET /api/v1/victims
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<Vec<Victim>>> {
    let victims = VictimRepo::list(&state.pool).await?;
    Ok(Json(victims))
}

/// GET /api/v1/victims/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Victim>> {
    let victim = VictimRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Victim", id)))?;
    Ok(Json(victim))
}

/// PUT /api/v1/victims/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVictim>,
) -> AppResult<Json<Victim>> {
    if let Some(name) = &input.name {
        validate_victim_name(name)?;
    }
    validate_contact(input.contact.as_deref())?;

    let victim = VictimRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Victim", id)))?;

    state.publish(
        ChangeEvent::updated(ENTITY_VICTIM, victim.id)
            .with_actor(auth.user_id)
            .with_payload(&victim),
    );
    Ok(Json(victim))
}

/// DELETE /api/v1/victims/{id}
///
/// Cases that referenced the victim keep existing without one.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = VictimRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Victim", id)));
    }

    tracing::info!(victim_id = id, user_id = auth.user_id, "Victim deleted");
    state.publish(ChangeEvent::deleted(ENTITY_VICTIM, id).with_actor(auth.user_id));
    Ok(StatusCode::NO_CONTENT)
}
