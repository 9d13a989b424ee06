//! Handlers for evidence, both case-scoped (`/cases/{id}/evidence`) and
//! global (`/evidence`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use caseboard_core::activity::ENTITY_EVIDENCE;
use caseboard_core::error::CoreError;
use caseboard_core::evidence::{
    detect_evidence_type, format_file_size_mb, validate_file_name, validate_file_size,
    EvidenceType,
};
use caseboard_core::hashing::normalize_sha256_hex;
use caseboard_core::types::DbId;
use caseboard_core::text::blank_to_none;
use caseboard_db::models::evidence::{CreateEvidence, Evidence, EvidenceWithCase, UpdateEvidence};
use caseboard_db::repositories::{CaseRepo, EvidenceRepo};
use caseboard_events::ChangeEvent;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::DetectTypeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Validate a new evidence item and normalize its hash to lowercase hex.
///
/// Shared with composite case creation.
pub(crate) fn prepare_create(input: &mut CreateEvidence) -> Result<(), CoreError> {
    input.file_name = blank_to_none(input.file_name.take());
    input.storage_location = blank_to_none(input.storage_location.take());
    validate_file_name(input.file_name.as_deref())?;
    validate_file_size(input.file_size)?;
    input.file_hash_sha256 = blank_to_none(input.file_hash_sha256.take())
        .map(|h| normalize_sha256_hex(&h))
        .transpose()?;
    Ok(())
}

/// Evidence item plus a display-friendly size.
#[derive(Debug, Serialize)]
pub struct EvidenceView {
    #[serde(flatten)]
    pub evidence: Evidence,
    pub file_size_mb: Option<String>,
}

impl From<Evidence> for EvidenceView {
    fn from(evidence: Evidence) -> Self {
        let file_size_mb = evidence.file_size.map(format_file_size_mb);
        Self {
            evidence,
            file_size_mb,
        }
    }
}

/// Result of `GET /evidence/detect-type`.
#[derive(Debug, Serialize)]
pub struct DetectedType {
    pub evidence_type: EvidenceType,
    pub label: String,
}

/// POST /api/v1/cases/{case_id}/evidence
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(case_id): Path<DbId>,
    Json(mut input): Json<CreateEvidence>,
) -> AppResult<(StatusCode, Json<EvidenceView>)> {
    prepare_create(&mut input)?;

    let evidence = EvidenceRepo::create(&state.pool, case_id, &input, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Case", case_id)))?;

    tracing::info!(
        evidence_id = evidence.id,
        evidence_number = %evidence.evidence_number,
        case_id,
        "Evidence registered"
    );
    state.publish(
        ChangeEvent::created(ENTITY_EVIDENCE, evidence.id)
            .with_actor(auth.user_id)
            .with_payload(&evidence),
    );
    Ok((StatusCode::CREATED, Json(evidence.into())))
}

/// GET /api/v1/cases/{case_id}/evidence
pub async fn list_by_case(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(case_id): Path<DbId>,
) -> AppResult<Json<Vec<EvidenceView>>> {
    CaseRepo::find_by_id(&state.pool, case_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Case", case_id)))?;

    let items = EvidenceRepo::list_by_case(&state.pool, case_id).await?;
    Ok(Json(items.into_iter().map(EvidenceView::from).collect()))
}

/// GET /api/v1/evidence
pub async fn list_all(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<EvidenceWithCase>>> {
    let items = EvidenceRepo::list_all(&state.pool).await?;
    Ok(Json(items))
}

/// GET /api/v1/evidence/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<EvidenceView>> {
    let evidence = EvidenceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Evidence", id)))?;
    Ok(Json(evidence.into()))
}

/// PUT /api/v1/evidence/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateEvidence>,
) -> AppResult<Json<EvidenceView>> {
    validate_file_name(input.file_name.as_deref())?;
    validate_file_size(input.file_size)?;
    input.file_hash_sha256 = input
        .file_hash_sha256
        .as_deref()
        .map(normalize_sha256_hex)
        .transpose()?;

    let evidence = EvidenceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Evidence", id)))?;

    state.publish(
        ChangeEvent::updated(ENTITY_EVIDENCE, evidence.id)
            .with_actor(auth.user_id)
            .with_payload(&evidence),
    );
    Ok(Json(evidence.into()))
}

/// DELETE /api/v1/evidence/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EvidenceRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Evidence", id)));
    }

    state.publish(ChangeEvent::deleted(ENTITY_EVIDENCE, id).with_actor(auth.user_id));
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/evidence/detect-type?file_name=&mime=
///
/// At least one of `file_name` or `mime` must be non-blank.
pub async fn detect_type(
    _auth: AuthUser,
    Query(params): Query<DetectTypeParams>,
) -> AppResult<Json<DataResponse<DetectedType>>> {
    let mime = params.mime.as_deref().map(str::trim).unwrap_or_default();
    if params.file_name.trim().is_empty() && mime.is_empty() {
        return Err(AppError::BadRequest(
            "file_name or mime is required".to_string(),
        ));
    }

    let evidence_type = detect_evidence_type(&params.file_name, params.mime.as_deref());
    Ok(Json(DataResponse {
        data: DetectedType {
            evidence_type,
            label: evidence_type.label(),
        },
    }))
}
