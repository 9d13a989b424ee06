use axum::routing::get;
use axum::Router;

use crate::handlers::action_template;
use crate::state::AppState;

/// Routes mounted at `/action-templates`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(action_template::list))
}
