//! Route definitions for the `/suspects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::suspect;
use crate::state::AppState;

/// Routes mounted at `/suspects`.
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
        .route("/", get(suspect::list).post(suspect::create))
        .route(
            "/{id}",
            get(suspect::get_by_id)
                .put(suspect::update)
                .delete(suspect::delete),
        )
}
