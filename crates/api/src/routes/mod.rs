pub mod action_template;
pub mod activity;
pub mod case;
pub mod dashboard;
pub mod evidence;
pub mod health;
pub mod suspect;
pub mod victim;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree. Every route requires a Bearer token.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                              change notifications (WebSocket)
///
/// /victims                                         list, create
/// /victims/{id}                                    get, update, delete
///
/// /suspects                                        list, create
/// /suspects/{id}                                   get, update, delete
///
/// /cases                                           list (?status, ?case_type), create
/// /cases/{id}                                      detail, update, delete
/// /cases/{id}/status                               change status (PATCH)
/// /cases/{id}/suspects                             list, link
/// /cases/{id}/suspects/{suspect_id}                change involvement, unlink
/// /cases/{id}/evidence                             list, create
/// /cases/{id}/actions                              list, create
/// /cases/{id}/actions/{action_id}                  toggle completion (PATCH), delete
///
/// /evidence                                        list with case number
/// /evidence/detect-type                            classify a file name / MIME type
/// /evidence/{id}                                   get, update, delete
///
/// /action-templates                                fixed checklist templates
/// /dashboard/stats                                 aggregate counts
/// /activity                                        audit trail (filters, paging)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/victims", victim::router())
        .nest("/suspects", suspect::router())
        // Cases, with nested suspects, evidence and checklist.
        .nest("/cases", case::router())
        .nest("/evidence", evidence::router())
        .nest("/action-templates", action_template::router())
        .nest("/dashboard", dashboard::router())
        .nest("/activity", activity::router())
}
