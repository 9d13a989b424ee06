//! Route definitions for the global `/evidence` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::evidence;
use crate::state::AppState;

/// Routes mounted at `/evidence`.
///
/// ```text
/// GET    /                  -> list_all (with case number)
/// GET    /detect-type       -> detect_type (?file_name, ?mime)
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(evidence::list_all))
        .route("/detect-type", get(evidence::detect_type))
        .route(
            "/{id}",
            get(evidence::get_by_id)
                .put(evidence::update)
                .delete(evidence::delete),
        )
}
