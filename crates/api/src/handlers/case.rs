//! Handlers for the `/cases` resource.
//!
//! Creation is composite: the request may carry a new victim, new or
//! existing suspects, evidence items and a template selection, all written
//! together once a case number has been allocated.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use caseboard_core::activity::ENTITY_CASE;
use caseboard_core::case::{validate_incident_date, validate_summary};
use caseboard_core::error::CoreError;
use caseboard_core::forensic_action::{default_template_ids, resolve_templates, ActionTemplate};
use caseboard_core::types::DbId;
use caseboard_db::models::case::{
    Case, CaseDetail, CaseListItem, CaseListQuery, CreateCase, UpdateCase, UpdateCaseStatus,
};
use caseboard_db::repositories::CaseRepo;
use caseboard_events::ChangeEvent;
use chrono::Utc;

use crate::engine::case_number::allocate_case_number;
use crate::error::{AppError, AppResult};
use crate::handlers::{case_suspect, evidence, victim};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Validate and normalize a composite create request, returning the
/// checklist templates to instantiate.
///
/// Omitting `action_template_ids` selects the default templates; an empty
/// list selects none.
pub(crate) fn prepare_create(
    input: &mut CreateCase,
) -> Result<Vec<&'static ActionTemplate>, CoreError> {
    input.summary = input.summary.trim().to_string();
    validate_summary(&input.summary)?;
    validate_incident_date(input.incident_date, Utc::now().date_naive())?;

    if input.victim.is_some() && input.victim_id.is_some() {
        return Err(CoreError::Validation(
            "Provide either victim_id or victim, not both".to_string(),
        ));
    }
    if let Some(new_victim) = input.victim.as_mut() {
        victim::prepare_create(new_victim)?;
    }
    for link in &mut input.suspects {
        case_suspect::prepare_link(link)?;
    }
    for item in &mut input.evidence {
        evidence::prepare_create(item)?;
    }

    let template_ids = input
        .action_template_ids
        .clone()
        .unwrap_or_else(default_template_ids);
    resolve_templates(&template_ids)
}

/// POST /api/v1/cases
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateCase>,
) -> AppResult<(StatusCode, Json<CaseDetail>)> {
    let templates = prepare_create(&mut input)?;

    let case_number =
        allocate_case_number(&state.pool, state.config.case_number_max_attempts).await?;
    let case =
        CaseRepo::create_with_children(&state.pool, &case_number, &input, &templates, auth.user_id)
            .await?;

    tracing::info!(
        case_id = case.id,
        case_number = %case.case_number,
        suspects = input.suspects.len(),
        evidence = input.evidence.len(),
        actions = templates.len(),
        user_id = auth.user_id,
        "Case created"
    );

    let detail = CaseRepo::find_detail(&state.pool, case.id)
        .await?
        .ok_or(AppError::InternalError(format!(
            "Case {} vanished after creation",
            case.id
        )))?;

    state.publish(
        ChangeEvent::created(ENTITY_CASE, case.id)
            .with_actor(auth.user_id)
            .with_payload(&case),
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/cases?status=&case_type=
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<CaseListQuery>,
) -> AppResult<Json<Vec<CaseListItem>>> {
    let cases = CaseRepo::list(
        &state.pool,
        params.status.map(|s| s.as_str()),
        params.case_type.map(|t| t.as_str()),
    )
    .await?;
    Ok(Json(cases))
}

/// GET /api/v1/cases/{id}
///
/// The case with its victim, suspects, evidence, checklist and progress.
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CaseDetail>> {
    let detail = CaseRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Case", id)))?;
    Ok(Json(detail))
}

/// PUT /api/v1/cases/{id}
///
/// The case number is never changed.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCase>,
) -> AppResult<Json<Case>> {
    if let Some(summary) = input.summary.as_mut() {
        *summary = summary.trim().to_string();
        validate_summary(summary)?;
    }
    if let Some(incident_date) = input.incident_date {
        validate_incident_date(incident_date, Utc::now().date_naive())?;
    }

    let case = CaseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Case", id)))?;

    state.publish(
        ChangeEvent::updated(ENTITY_CASE, case.id)
            .with_actor(auth.user_id)
            .with_payload(&case),
    );
    Ok(Json(case))
}

/// PATCH /api/v1/cases/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCaseStatus>,
) -> AppResult<Json<Case>> {
    let case = CaseRepo::update_status(&state.pool, id, input.status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Case", id)))?;

    tracing::info!(case_id = id, status = %input.status.as_str(), "Case status changed");
    state.publish(
        ChangeEvent::updated(ENTITY_CASE, case.id)
            .with_actor(auth.user_id)
            .with_payload(&case),
    );
    Ok(Json(case))
}

/// DELETE /api/v1/cases/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CaseRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Case", id)));
    }

    state.publish(ChangeEvent::deleted(ENTITY_CASE, id).with_actor(auth.user_id));
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use caseboard_core::case::CaseType;
    use caseboard_db::models::case_suspect::LinkCaseSuspect;
    use caseboard_db::models::victim::CreateVictim;
    use chrono::Duration;

    use super::*;

    fn request() -> CreateCase {
        CreateCase {
            case_type: CaseType::Malware,
            incident_date: Utc::now().date_naive() - Duration::days(3),
            summary: "  Ransomware on file server  ".to_string(),
            victim_id: None,
            victim: None,
            assigned_to: None,
            suspects: Vec::new(),
            evidence: Vec::new(),
            action_template_ids: None,
        }
    }

    fn victim(name: &str) -> CreateVictim {
        CreateVictim {
            name: name.to_string(),
            contact: None,
            location: None,
            address: None,
            report_date: None,
            description: None,
        }
    }

    #[test]
    fn defaults_to_default_templates() {
        let mut input = request();
        let templates = prepare_create(&mut input).unwrap();
        let ids: Vec<&str> = templates.iter().map(|t| t.id).collect();
        assert_eq!(ids, ["1", "2", "5"]);
        assert_eq!(input.summary, "Ransomware on file server");
    }

    #[test]
    fn explicit_empty_selection_creates_no_actions() {
        let mut input = request();
        input.action_template_ids = Some(Vec::new());
        assert!(prepare_create(&mut input).unwrap().is_empty());
    }

    #[test]
    fn future_incident_date_is_rejected() {
        let mut input = request();
        input.incident_date = Utc::now().date_naive() + Duration::days(2);
        assert_matches!(prepare_create(&mut input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn victim_and_victim_id_are_exclusive() {
        let mut input = request();
        input.victim_id = Some(1);
        input.victim = Some(victim("Acme Ltd"));
        assert_matches!(prepare_create(&mut input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn inline_victim_is_validated() {
        let mut input = request();
        input.victim = Some(victim("   "));
        assert_matches!(prepare_create(&mut input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_suspect_entry_is_rejected() {
        let mut input = request();
        input.suspects.push(LinkCaseSuspect {
            suspect_id: None,
            suspect: None,
            involvement_level: None,
            relationship_to_case: None,
        });
        assert_matches!(prepare_create(&mut input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn unknown_template_is_rejected() {
        let mut input = request();
        input.action_template_ids = Some(vec!["42".to_string()]);
        assert_matches!(prepare_create(&mut input), Err(CoreError::Validation(_)));
    }
}
