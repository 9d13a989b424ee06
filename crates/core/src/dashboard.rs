//! Dashboard aggregation.
//!
//! The repository layer returns raw grouped counts; this module folds them
//! into the summary served to the dashboard. Rendering is the client's job.

use serde::Serialize;

use crate::case::{CaseStatus, CaseType};
use crate::forensic_action::progress_pct;

/// Number of trailing months included in the monthly trend.
pub const TREND_MONTHS: usize = 6;

/// Raw grouped counts as loaded from the store.
#[derive(Debug, Clone, Default)]
pub struct RawCounts {
    /// `(status, count)` pairs for cases.
    pub cases_by_status: Vec<(String, i64)>,
    /// `(case_type, count)` pairs for cases.
    pub cases_by_type: Vec<(String, i64)>,
    /// `("YYYY-MM", count)` pairs for case creation months.
    pub cases_by_month: Vec<(String, i64)>,
    pub victims: i64,
    pub suspects: i64,
    pub evidence: i64,
    pub actions: i64,
    pub completed_actions: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseTypeCount {
    pub case_type: CaseType,
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: String,
    pub cases: i64,
}

/// Summary served by `GET /dashboard/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_cases: i64,
    pub open_cases: i64,
    pub in_progress_cases: i64,
    pub closed_cases: i64,
    pub archived_cases: i64,
    pub total_victims: i64,
    pub total_suspects: i64,
    pub total_evidence: i64,
    pub total_actions: i64,
    pub completed_actions: i64,
    pub action_completion_pct: u8,
    /// Closed cases as a share of all cases.
    pub case_completion_pct: u8,
    pub case_types: Vec<CaseTypeCount>,
    pub monthly_trend: Vec<MonthlyCount>,
}

fn count_for(pairs: &[(String, i64)], key: &str) -> i64 {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, c)| *c)
        .sum()
}

/// Fold raw counts into [`DashboardStats`].
///
/// Every case type appears in `case_types`, zero-filled. The monthly trend is
/// sorted oldest first and trimmed to the last [`TREND_MONTHS`] months.
pub fn build_stats(raw: &RawCounts) -> DashboardStats {
    let total_cases: i64 = raw.cases_by_status.iter().map(|(_, c)| *c).sum();
    let closed_cases = count_for(&raw.cases_by_status, CaseStatus::Closed.as_str());

    let case_types = CaseType::ALL
        .iter()
        .map(|t| CaseTypeCount {
            case_type: *t,
            label: t.label(),
            count: count_for(&raw.cases_by_type, t.as_str()),
        })
        .collect();

    let mut months: Vec<MonthlyCount> = raw
        .cases_by_month
        .iter()
        .map(|(month, cases)| MonthlyCount {
            month: month.clone(),
            cases: *cases,
        })
        .collect();
    months.sort_by(|a, b| a.month.cmp(&b.month));
    let skip = months.len().saturating_sub(TREND_MONTHS);
    let monthly_trend = months.into_iter().skip(skip).collect();

    let completion = progress_pct(
        raw.completed_actions.max(0) as usize,
        raw.actions.max(0) as usize,
    );

    DashboardStats {
        total_cases,
        open_cases: count_for(&raw.cases_by_status, CaseStatus::Open.as_str()),
        in_progress_cases: count_for(&raw.cases_by_status, CaseStatus::InProgress.as_str()),
        closed_cases,
        archived_cases: count_for(&raw.cases_by_status, CaseStatus::Archived.as_str()),
        total_victims: raw.victims,
        total_suspects: raw.suspects,
        total_evidence: raw.evidence,
        total_actions: raw.actions,
        completed_actions: raw.completed_actions,
        action_completion_pct: completion,
        case_completion_pct: progress_pct(closed_cases.max(0) as usize, total_cases.max(0) as usize),
        case_types,
        monthly_trend,
    }
}
