//! Route definitions for the `/cases` resource.
//!
//! Also nests the case-scoped suspect links, evidence and checklist under
//! `/cases/{case_id}/...`.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::{case, case_suspect, evidence, forensic_action};
use crate::state::AppState;

/// Routes mounted at `/cases`.
///
/// ```text
/// GET    /                                      -> list (?status, ?case_type)
/// POST   /                                      -> create (composite)
/// GET    /{id}                                  -> get_by_id (assembled detail)
/// PUT    /{id}                                  -> update
/// DELETE /{id}                                  -> delete
/// PATCH  /{id}/status                           -> update_status
///
/// GET    /{case_id}/suspects                    -> case_suspect::list
/// POST   /{case_id}/suspects                    -> case_suspect::link
/// PUT    /{case_id}/suspects/{suspect_id}       -> case_suspect::update
/// DELETE /{case_id}/suspects/{suspect_id}       -> case_suspect::unlink
///
/// GET    /{case_id}/evidence                    -> evidence::list_by_case
/// POST   /{case_id}/evidence                    -> evidence::create
///
/// GET    /{case_id}/actions                     -> forensic_action::list_by_case
/// POST   /{case_id}/actions                     -> forensic_action::create
/// PATCH  /{case_id}/actions/{action_id}         -> forensic_action::set_completion
/// DELETE /{case_id}/actions/{action_id}         -> forensic_action::delete
/// ```
pub fn router() -> Router<AppState> {
    let suspect_routes = Router::new()
        .route("/", get(case_suspect::list).post(case_suspect::link))
        .route(
            "/{suspect_id}",
            put(case_suspect::update).delete(case_suspect::unlink),
        );

    let evidence_routes =
        Router::new().route("/", get(evidence::list_by_case).post(evidence::create));

    let action_routes = Router::new()
        .route(
            "/",
            get(forensic_action::list_by_case).post(forensic_action::create),
        )
        .route(
            "/{action_id}",
            patch(forensic_action::set_completion).delete(forensic_action::delete),
        );

    Router::new()
        .route("/", get(case::list).post(case::create))
        .route(
            "/{id}",
            get(case::get_by_id).put(case::update).delete(case::delete),
        )
        .route("/{id}/status", patch(case::update_status))
        .nest("/{case_id}/suspects", suspect_routes)
        .nest("/{case_id}/evidence", evidence_routes)
        .nest("/{case_id}/actions", action_routes)
}
