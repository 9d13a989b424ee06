//! Repository for the `forensic_actions` table.

use caseboard_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::forensic_action::ForensicAction;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, case_id, template_id, action_type, description, status, \
    is_completed, completed_at, performed_by, created_at, updated_at";

/// Provides operations on a case's forensic checklist.
pub struct ForensicActionRepo;

impl ForensicActionRepo {
    /// Add a pending checklist item to a case.
    pub async fn create(
        pool: &PgPool,
        case_id: DbId,
        template_id: Option<&str>,
        action_type: &str,
        description: &str,
        performed_by: DbId,
    ) -> Result<ForensicAction, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut conn, case_id, template_id, action_type, description, performed_by)
            .await
    }

    /// Insert on an existing connection or transaction.
    pub(crate) async fn insert(
        conn: &mut sqlx::PgConnection,
        case_id: DbId,
        template_id: Option<&str>,
        action_type: &str,
        description: &str,
        performed_by: DbId,
    ) -> Result<ForensicAction, sqlx::Error> {
        let query = format!(
            "INSERT INTO forensic_actions (case_id, template_id, action_type, description, performed_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ForensicAction>(&query)
            .bind(case_id)
            .bind(template_id)
            .bind(action_type)
            .bind(description)
            .bind(performed_by)
            .fetch_one(conn)
            .await
    }

    /// List the checklist of a case in creation order.
    pub async fn list_by_case(
        pool: &PgPool,
        case_id: DbId,
    ) -> Result<Vec<ForensicAction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forensic_actions WHERE case_id = $1 ORDER BY id");
        sqlx::query_as::<_, ForensicAction>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    /// Find a checklist item by ID within a case.
    pub async fn find_by_id(
        pool: &PgPool,
        case_id: DbId,
        id: DbId,
    ) -> Result<Option<ForensicAction>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM forensic_actions WHERE id = $1 AND case_id = $2");
        sqlx::query_as::<_, ForensicAction>(&query)
            .bind(id)
            .bind(case_id)
            .fetch_optional(pool)
            .await
    }

    /// Set the completion state of a checklist item.
    ///
    /// `completed_at` must be `Some` exactly when `is_completed` is true.
    /// Returns `None` if the item does not exist on the case.
    pub async fn set_completed(
        pool: &PgPool,
        case_id: DbId,
        id: DbId,
        is_completed: bool,
        status: &str,
        completed_at: Option<Timestamp>,
    ) -> Result<Option<ForensicAction>, sqlx::Error> {
        let query = format!(
            "UPDATE forensic_actions SET \
                is_completed = $3, \
                status = $4, \
                completed_at = $5 \
             WHERE id = $1 AND case_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ForensicAction>(&query)
            .bind(id)
            .bind(case_id)
            .bind(is_completed)
            .bind(status)
            .bind(completed_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a checklist item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, case_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM forensic_actions WHERE id = $1 AND case_id = $2")
            .bind(id)
            .bind(case_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
