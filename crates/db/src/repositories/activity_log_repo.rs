//! Repository for the `activity_logs` table.

use caseboard_core::activity::{clamp_limit, clamp_offset};
use sqlx::PgPool;

use crate::models::activity_log::{ActivityLog, ActivityPage, ActivityQuery, CreateActivityLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, action, entity_type, entity_id, details, created_at, updated_at";

/// Shared filter clause for list and count queries.
const FILTER: &str = "($1::BIGINT IS NULL OR user_id = $1) \
    AND ($2::TEXT IS NULL OR entity_type = $2) \
    AND ($3::BIGINT IS NULL OR entity_id = $3)";

/// Append-only access to the audit trail.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append an entry, returning the stored row.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, action, entity_type, entity_id, details) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Query entries newest first, with optional filters and clamped paging.
    pub async fn query(pool: &PgPool, params: &ActivityQuery) -> Result<ActivityPage, sqlx::Error> {
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs WHERE {FILTER} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $4 OFFSET $5"
        );
        let items = sqlx::query_as::<_, ActivityLog>(&query)
            .bind(params.user_id)
            .bind(&params.entity_type)
            .bind(params.entity_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM activity_logs WHERE {FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(params.user_id)
            .bind(&params.entity_type)
            .bind(params.entity_id)
            .fetch_one(pool)
            .await?;

        Ok(ActivityPage { items, total })
    }
}
