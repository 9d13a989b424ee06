//! Repository for the `cases` table and the case aggregate.

use caseboard_core::evidence::evidence_number;
use caseboard_core::forensic_action::{progress_pct, ActionTemplate};
use caseboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::case::{Case, CaseDetail, CaseListItem, CreateCase, UpdateCase};
use crate::repositories::{
    CaseSuspectRepo, EvidenceRepo, ForensicActionRepo, SuspectRepo, VictimRepo,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, case_number, case_type, status, incident_date, summary, victim_id, \
    assigned_to, created_by, created_at, updated_at";

/// Case columns prefixed for JOIN queries.
const JOINED_COLUMNS: &str = "c.id, c.case_number, c.case_type, c.status, c.incident_date, \
    c.summary, c.victim_id, c.assigned_to, c.created_by, c.created_at, c.updated_at";

/// Provides CRUD operations for cases and assembles the case detail view.
pub struct CaseRepo;

impl CaseRepo {
    /// Whether a case with this number already exists.
    pub async fn case_number_exists(pool: &PgPool, case_number: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM cases WHERE case_number = $1)")
            .bind(case_number)
            .fetch_one(pool)
            .await
    }

    /// Open a case together with its related records in one transaction.
    ///
    /// In order: the inline victim (if any), the case row, suspects and
    /// their join rows, evidence numbered `-E001` upward, and one checklist
    /// item per template. Any failure rolls back everything.
    ///
    /// Suspect entries with neither `suspect_id` nor `suspect` are skipped;
    /// callers validate input beforehand.
    pub async fn create_with_children(
        pool: &PgPool,
        case_number: &str,
        input: &CreateCase,
        templates: &[&ActionTemplate],
        created_by: DbId,
    ) -> Result<Case, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let victim_id = match &input.victim {
            Some(victim) => Some(VictimRepo::insert(&mut tx, victim, created_by).await?.id),
            None => input.victim_id,
        };

        let insert_query = format!(
            "INSERT INTO cases \
                (case_number, case_type, incident_date, summary, victim_id, assigned_to, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let case = sqlx::query_as::<_, Case>(&insert_query)
            .bind(case_number)
            .bind(input.case_type.as_str())
            .bind(input.incident_date)
            .bind(&input.summary)
            .bind(victim_id)
            .bind(input.assigned_to)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        for link in &input.suspects {
            let suspect_id = match (link.suspect_id, &link.suspect) {
                (Some(id), _) => id,
                (None, Some(new)) => SuspectRepo::insert(&mut tx, new, created_by).await?.id,
                (None, None) => continue,
            };
            CaseSuspectRepo::insert(
                &mut tx,
                case.id,
                suspect_id,
                link.involvement_level.map(|l| l.as_str()),
                link.relationship_to_case.as_deref(),
            )
            .await?;
        }

        for (index, item) in input.evidence.iter().enumerate() {
            let number = evidence_number(&case.case_number, index as i64 + 1);
            EvidenceRepo::insert(&mut tx, case.id, &number, item, created_by).await?;
        }

        for template in templates {
            ForensicActionRepo::insert(
                &mut tx,
                case.id,
                Some(template.id),
                template.action_type,
                template.description,
                created_by,
            )
            .await?;
        }

        tx.commit().await?;
        Ok(case)
    }

    /// Find a case by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Case>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cases WHERE id = $1");
        sqlx::query_as::<_, Case>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a case by ID, enriched with its victim, suspects, evidence, and
    /// checklist.
    ///
    /// Each relation is loaded with its own query, in that order.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<CaseDetail>, sqlx::Error> {
        let Some(case) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let victim = match case.victim_id {
            Some(victim_id) => VictimRepo::find_by_id(pool, victim_id).await?,
            None => None,
        };
        let suspects = SuspectRepo::list_for_case(pool, case.id).await?;
        let evidence = EvidenceRepo::list_by_case(pool, case.id).await?;
        let forensic_actions = ForensicActionRepo::list_by_case(pool, case.id).await?;

        let completed = forensic_actions.iter().filter(|a| a.is_completed).count();
        let progress_pct = progress_pct(completed, forensic_actions.len());

        Ok(Some(CaseDetail {
            case,
            victim,
            suspects,
            evidence,
            forensic_actions,
            progress_pct,
        }))
    }

    /// List cases with their victim's name, newest first.
    ///
    /// `status` and `case_type` filter when present.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        case_type: Option<&str>,
    ) -> Result<Vec<CaseListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, v.name AS victim_name \
             FROM cases c \
             LEFT JOIN victims v ON v.id = c.victim_id \
             WHERE ($1::TEXT IS NULL OR c.status = $1) \
               AND ($2::TEXT IS NULL OR c.case_type = $2) \
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, CaseListItem>(&query)
            .bind(status)
            .bind(case_type)
            .fetch_all(pool)
            .await
    }

    /// Update a case. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCase,
    ) -> Result<Option<Case>, sqlx::Error> {
        let query = format!(
            "UPDATE cases SET \
                case_type = COALESCE($2, case_type), \
                status = COALESCE($3, status), \
                incident_date = COALESCE($4, incident_date), \
                summary = COALESCE($5, summary), \
                victim_id = COALESCE($6, victim_id), \
                assigned_to = COALESCE($7, assigned_to) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Case>(&query)
            .bind(id)
            .bind(input.case_type.map(|t| t.as_str()))
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.incident_date)
            .bind(&input.summary)
            .bind(input.victim_id)
            .bind(input.assigned_to)
            .fetch_optional(pool)
            .await
    }

    /// Set the status of a case. Returns `None` if the case does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Case>, sqlx::Error> {
        let query = format!("UPDATE cases SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Case>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a case with its evidence, checklist, and suspect
    /// links. Victims and suspects themselves are kept.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cases WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
