//! Repository for the `victims` table.

use caseboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::victim::{CreateVictim, UpdateVictim, Victim};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, contact, location, address, report_date, \
    description, created_by, created_at, updated_at";

/// Provides CRUD operations for victims.
pub struct VictimRepo;

impl VictimRepo {
    /// Insert a new victim, returning the created row.
    ///
    /// If `report_date` is `None`, the database default (today) applies.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVictim,
        created_by: DbId,
    ) -> Result<Victim, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut conn, input, created_by).await
    }

    /// Insert on an existing connection or transaction.
    pub(crate) async fn insert(
        conn: &mut sqlx::PgConnection,
        input: &CreateVictim,
        created_by: DbId,
    ) -> Result<Victim, sqlx::Error> {
        let query = format!(
            "INSERT INTO victims (name, contact, location, address, report_date, description, created_by) \
             VALUES ($1, $2, $3, $4, COALESCE($5, CURRENT_DATE), $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Victim>(&query)
            .bind(&input.name)
            .bind(&input.contact)
            .bind(&input.location)
            .bind(&input.address)
            .bind(input.report_date)
            .bind(&input.description)
            .bind(created_by)
            .fetch_one(conn)
            .await
    }

    /// Find a victim by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Victim>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM victims WHERE id = $1");
        sqlx::query_as::<_, Victim>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all victims ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Victim>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM victims ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Victim>(&query).fetch_all(pool).await
    }

    /// Update a victim. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVictim,
    ) -> Result<Option<Victim>, sqlx::Error> {
        let query = format!(
            "UPDATE victims SET \
                name = COALESCE($2, name), \
                contact = COALESCE($3, contact), \
                location = COALESCE($4, location), \
                address = COALESCE($5, address), \
                report_date = COALESCE($6, report_date), \
                description = COALESCE($7, description) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Victim>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.contact)
            .bind(&input.location)
            .bind(&input.address)
            .bind(input.report_date)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a victim by ID. Cases that referenced it keep existing with
    /// `victim_id` cleared. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM victims WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
