//! Repository for the `suspects` table.

use caseboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::case_suspect::CaseSuspectDetail;
use crate::models::suspect::{CreateSuspect, Suspect, UpdateSuspect};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, contact, address, identification_number, status, notes, \
    created_by, created_at, updated_at";

/// Suspect columns prefixed for JOIN queries.
const JOINED_COLUMNS: &str = "s.id, s.name, s.contact, s.address, s.identification_number, \
    s.status, s.notes, s.created_by, s.created_at, s.updated_at";

/// Provides CRUD operations for suspects.
pub struct SuspectRepo;

impl SuspectRepo {
    /// Insert a new suspect, returning the created row.
    ///
    /// If `status` is `None`, defaults to `suspect`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSuspect,
        created_by: DbId,
    ) -> Result<Suspect, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut conn, input, created_by).await
    }

    /// Insert on an existing connection or transaction.
    pub(crate) async fn insert(
        conn: &mut sqlx::PgConnection,
        input: &CreateSuspect,
        created_by: DbId,
    ) -> Result<Suspect, sqlx::Error> {
        let query = format!(
            "INSERT INTO suspects \
                (name, contact, address, identification_number, status, notes, created_by) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'suspect'), $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Suspect>(&query)
            .bind(&input.name)
            .bind(&input.contact)
            .bind(&input.address)
            .bind(&input.identification_number)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(conn)
            .await
    }

    /// Find a suspect by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Suspect>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suspects WHERE id = $1");
        sqlx::query_as::<_, Suspect>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all suspects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Suspect>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suspects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Suspect>(&query).fetch_all(pool).await
    }

    /// Update a suspect. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSuspect,
    ) -> Result<Option<Suspect>, sqlx::Error> {
        let query = format!(
            "UPDATE suspects SET \
                name = COALESCE($2, name), \
                contact = COALESCE($3, contact), \
                address = COALESCE($4, address), \
                identification_number = COALESCE($5, identification_number), \
                status = COALESCE($6, status), \
                notes = COALESCE($7, notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Suspect>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.contact)
            .bind(&input.address)
            .bind(&input.identification_number)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a suspect by ID, unlinking it from every case.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM suspects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Suspects linked to a case, with their involvement in it, in link order.
    pub async fn list_for_case(
        pool: &PgPool,
        case_id: DbId,
    ) -> Result<Vec<CaseSuspectDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, cs.involvement_level, cs.relationship_to_case \
             FROM suspects s \
             JOIN case_suspects cs ON cs.suspect_id = s.id \
             WHERE cs.case_id = $1 \
             ORDER BY cs.id"
        );
        sqlx::query_as::<_, CaseSuspectDetail>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }
}
