//! Shared response envelope types for API handlers.
//!
//! CRUD endpoints return the entity directly. Aggregate endpoints
//! (dashboard, activity, templates) use a `{ "data": ... }` envelope via
//! [`DataResponse`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: stats }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
