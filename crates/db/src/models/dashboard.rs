//! Row shapes for the dashboard's grouped-count queries.

use sqlx::FromRow;

/// One `GROUP BY` bucket.
#[derive(Debug, Clone, FromRow)]
pub struct GroupCount {
    pub key: String,
    pub count: i64,
}

/// Table totals, loaded in a single row.
#[derive(Debug, Clone, FromRow)]
pub struct TableTotals {
    pub victims: i64,
    pub suspects: i64,
    pub evidence: i64,
    pub actions: i64,
    pub completed_actions: i64,
}
