//! Repository for the `case_suspects` join table.

use caseboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::case_suspect::{CaseSuspect, UpdateCaseSuspect};
use crate::models::suspect::{CreateSuspect, Suspect};
use crate::repositories::SuspectRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, case_id, suspect_id, involvement_level, relationship_to_case, created_at, updated_at";

/// Links suspects to cases.
pub struct CaseSuspectRepo;

impl CaseSuspectRepo {
    /// Link an existing suspect to a case.
    ///
    /// If `involvement_level` is `None`, defaults to `unknown`. Linking the
    /// same suspect twice violates `uq_case_suspects_case_suspect`.
    pub async fn link(
        pool: &PgPool,
        case_id: DbId,
        suspect_id: DbId,
        involvement_level: Option<&str>,
        relationship_to_case: Option<&str>,
    ) -> Result<CaseSuspect, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut conn, case_id, suspect_id, involvement_level, relationship_to_case).await
    }

    /// Create a new suspect and link it to a case in one transaction.
    pub async fn link_new_suspect(
        pool: &PgPool,
        case_id: DbId,
        suspect: &CreateSuspect,
        involvement_level: Option<&str>,
        relationship_to_case: Option<&str>,
        created_by: DbId,
    ) -> Result<(Suspect, CaseSuspect), sqlx::Error> {
        let mut tx = pool.begin().await?;
        let suspect = SuspectRepo::insert(&mut tx, suspect, created_by).await?;
        let link = Self::insert(
            &mut tx,
            case_id,
            suspect.id,
            involvement_level,
            relationship_to_case,
        )
        .await?;
        tx.commit().await?;
        Ok((suspect, link))
    }

    /// Insert a join row on an existing connection or transaction.
    pub(crate) async fn insert(
        conn: &mut sqlx::PgConnection,
        case_id: DbId,
        suspect_id: DbId,
        involvement_level: Option<&str>,
        relationship_to_case: Option<&str>,
    ) -> Result<CaseSuspect, sqlx::Error> {
        let query = format!(
            "INSERT INTO case_suspects (case_id, suspect_id, involvement_level, relationship_to_case) \
             VALUES ($1, $2, COALESCE($3, 'unknown'), $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CaseSuspect>(&query)
            .bind(case_id)
            .bind(suspect_id)
            .bind(involvement_level)
            .bind(relationship_to_case)
            .fetch_one(conn)
            .await
    }

    /// Change how a linked suspect is involved in a case.
    ///
    /// Returns `None` if the suspect is not linked to the case.
    pub async fn update(
        pool: &PgPool,
        case_id: DbId,
        suspect_id: DbId,
        input: &UpdateCaseSuspect,
    ) -> Result<Option<CaseSuspect>, sqlx::Error> {
        let query = format!(
            "UPDATE case_suspects SET \
                involvement_level = COALESCE($3, involvement_level), \
                relationship_to_case = COALESCE($4, relationship_to_case) \
             WHERE case_id = $1 AND suspect_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CaseSuspect>(&query)
            .bind(case_id)
            .bind(suspect_id)
            .bind(input.involvement_level.map(|l| l.as_str()))
            .bind(&input.relationship_to_case)
            .fetch_optional(pool)
            .await
    }

    /// Remove a suspect from a case. The suspect itself is kept.
    /// Returns the id of the removed link, or `None` if there was none.
    pub async fn unlink(
        pool: &PgPool,
        case_id: DbId,
        suspect_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "DELETE FROM case_suspects WHERE case_id = $1 AND suspect_id = $2 RETURNING id",
        )
        .bind(case_id)
        .bind(suspect_id)
        .fetch_optional(pool)
        .await
    }
}
