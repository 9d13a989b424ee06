use axum::routing::get;
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

/// Routes mounted at `/activity`.
///
/// ```text
/// GET /    -> list (?entity_type, ?entity_id, ?user_id, ?limit, ?offset)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(activity::list))
}
