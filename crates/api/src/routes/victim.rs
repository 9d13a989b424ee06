//! Route definitions for the `/victims` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::victim;
use crate::state::AppState;

/// Routes mounted at `/victims`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(victim::list).post(victim::create))
        .route(
            "/{id}",
            get(victim::get_by_id)
                .put(victim::update)
                .delete(victim::delete),
        )
}
