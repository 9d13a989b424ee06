//! Grouped counts backing the dashboard.

use caseboard_core::dashboard::{RawCounts, TREND_MONTHS};
use sqlx::PgPool;

use crate::models::dashboard::{GroupCount, TableTotals};

/// Read-only aggregate queries over all tables.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Load every count the dashboard needs.
    ///
    /// The monthly buckets cover the last [`TREND_MONTHS`] calendar months
    /// including the current one.
    pub async fn load_counts(pool: &PgPool) -> Result<RawCounts, sqlx::Error> {
        let cases_by_status = Self::group_cases(pool, "status").await?;
        let cases_by_type = Self::group_cases(pool, "case_type").await?;

        let cases_by_month = sqlx::query_as::<_, GroupCount>(
            "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS key, COUNT(*) AS count \
             FROM cases \
             WHERE created_at >= date_trunc('month', NOW()) - make_interval(months => $1) \
             GROUP BY 1 \
             ORDER BY 1",
        )
        .bind(TREND_MONTHS as i32 - 1)
        .fetch_all(pool)
        .await?;

        let totals = sqlx::query_as::<_, TableTotals>(
            "SELECT \
                (SELECT COUNT(*) FROM victims) AS victims, \
                (SELECT COUNT(*) FROM suspects) AS suspects, \
                (SELECT COUNT(*) FROM evidence) AS evidence, \
                (SELECT COUNT(*) FROM forensic_actions) AS actions, \
                (SELECT COUNT(*) FROM forensic_actions WHERE is_completed) AS completed_actions",
        )
        .fetch_one(pool)
        .await?;

        Ok(RawCounts {
            cases_by_status: into_pairs(cases_by_status),
            cases_by_type: into_pairs(cases_by_type),
            cases_by_month: into_pairs(cases_by_month),
            victims: totals.victims,
            suspects: totals.suspects,
            evidence: totals.evidence,
            actions: totals.actions,
            completed_actions: totals.completed_actions,
        })
    }

    /// `column` is one of a fixed set of identifiers, never user input.
    async fn group_cases(pool: &PgPool, column: &'static str) -> Result<Vec<GroupCount>, sqlx::Error> {
        let query = format!(
            "SELECT {column} AS key, COUNT(*) AS count FROM cases GROUP BY {column} ORDER BY {column}"
        );
        sqlx::query_as::<_, GroupCount>(&query).fetch_all(pool).await
    }
}

fn into_pairs(rows: Vec<GroupCount>) -> Vec<(String, i64)> {
    rows.into_iter().map(|r| (r.key, r.count)).collect()
}
