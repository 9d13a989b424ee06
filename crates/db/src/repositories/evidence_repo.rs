//! Repository for the `evidence` table.

use caseboard_core::evidence::evidence_number;
use caseboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::evidence::{CreateEvidence, Evidence, EvidenceWithCase, UpdateEvidence};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, case_id, evidence_number, evidence_type, file_name, description, \
    file_size, file_hash_sha256, storage_location, collected_by, collection_date, \
    created_at, updated_at";

/// Evidence columns prefixed for JOIN queries.
const JOINED_COLUMNS: &str = "e.id, e.case_id, e.evidence_number, e.evidence_type, \
    e.file_name, e.description, e.file_size, e.file_hash_sha256, e.storage_location, \
    e.collected_by, e.collection_date, e.created_at, e.updated_at";

/// Provides CRUD operations for evidence items.
pub struct EvidenceRepo;

impl EvidenceRepo {
    /// Register a new evidence item on a case.
    ///
    /// The evidence number continues the case's sequence. The case row is
    /// locked for the duration so concurrent inserts cannot claim the same
    /// number. Returns `None` if the case does not exist.
    pub async fn create(
        pool: &PgPool,
        case_id: DbId,
        input: &CreateEvidence,
        collected_by: DbId,
    ) -> Result<Option<Evidence>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let case_number = sqlx::query_scalar::<_, String>(
            "SELECT case_number FROM cases WHERE id = $1 FOR UPDATE",
        )
        .bind(case_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(case_number) = case_number else {
            return Ok(None);
        };

        let next_seq = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(substring(evidence_number FROM '-E([0-9]+)$')::BIGINT), 0) + 1 \
             FROM evidence WHERE case_id = $1",
        )
        .bind(case_id)
        .fetch_one(&mut *tx)
        .await?;

        let number = evidence_number(&case_number, next_seq);
        let evidence = Self::insert(&mut tx, case_id, &number, input, collected_by).await?;

        tx.commit().await?;
        Ok(Some(evidence))
    }

    /// Insert an evidence row with a pre-computed number on an existing
    /// connection or transaction.
    pub(crate) async fn insert(
        conn: &mut sqlx::PgConnection,
        case_id: DbId,
        number: &str,
        input: &CreateEvidence,
        collected_by: DbId,
    ) -> Result<Evidence, sqlx::Error> {
        let query = format!(
            "INSERT INTO evidence \
                (case_id, evidence_number, evidence_type, file_name, description, file_size, \
                 file_hash_sha256, storage_location, collected_by, collection_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, NOW())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Evidence>(&query)
            .bind(case_id)
            .bind(number)
            .bind(input.resolved_type().as_str())
            .bind(&input.file_name)
            .bind(&input.description)
            .bind(input.file_size)
            .bind(&input.file_hash_sha256)
            .bind(&input.storage_location)
            .bind(collected_by)
            .bind(input.collection_date)
            .fetch_one(conn)
            .await
    }

    /// Find an evidence item by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Evidence>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM evidence WHERE id = $1");
        sqlx::query_as::<_, Evidence>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every evidence item with its case number, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<EvidenceWithCase>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, c.case_number \
             FROM evidence e \
             JOIN cases c ON c.id = e.case_id \
             ORDER BY e.created_at DESC, e.id DESC"
        );
        sqlx::query_as::<_, EvidenceWithCase>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the evidence of one case in evidence-number order.
    pub async fn list_by_case(pool: &PgPool, case_id: DbId) -> Result<Vec<Evidence>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM evidence WHERE case_id = $1 ORDER BY evidence_number, id"
        );
        sqlx::query_as::<_, Evidence>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    /// Number of evidence items registered on a case.
    pub async fn count_for_case(pool: &PgPool, case_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM evidence WHERE case_id = $1")
            .bind(case_id)
            .fetch_one(pool)
            .await
    }

    /// Update an evidence item. Only non-`None` fields in `input` are applied.
    /// The evidence number and owning case never change.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvidence,
    ) -> Result<Option<Evidence>, sqlx::Error> {
        let query = format!(
            "UPDATE evidence SET \
                evidence_type = COALESCE($2, evidence_type), \
                file_name = COALESCE($3, file_name), \
                description = COALESCE($4, description), \
                file_size = COALESCE($5, file_size), \
                file_hash_sha256 = COALESCE($6, file_hash_sha256), \
                storage_location = COALESCE($7, storage_location) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Evidence>(&query)
            .bind(id)
            .bind(input.evidence_type.map(|t| t.as_str()))
            .bind(&input.file_name)
            .bind(&input.description)
            .bind(input.file_size)
            .bind(&input.file_hash_sha256)
            .bind(&input.storage_location)
            .fetch_optional(pool)
            .await
    }

    /// Delete an evidence item by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM evidence WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
