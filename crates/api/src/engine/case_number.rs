//! Case-number allocation.
//!
//! Candidates come from [`generate_case_number`]; each is checked against the
//! store and regenerated on collision, up to a bounded number of sequential
//! attempts. The `uq_cases_case_number` constraint remains the final guard
//! against a concurrent insert of the same number.

use std::future::Future;

use caseboard_core::case::generate_case_number;
use caseboard_core::error::CoreError;
use caseboard_db::repositories::CaseRepo;
use caseboard_db::DbPool;
use chrono::Utc;

use crate::error::{AppError, AppResult};

/// Allocate an unused case number, checking each candidate against `cases`.
pub async fn allocate_case_number(pool: &DbPool, max_attempts: u32) -> AppResult<String> {
    allocate_with(max_attempts, |candidate| async move {
        CaseRepo::case_number_exists(pool, &candidate).await
    })
    .await
}

/// Generate-and-check loop over an arbitrary existence check.
///
/// Gives up with [`CoreError::Conflict`] after `max_attempts` collisions
/// (at least one attempt is always made).
pub async fn allocate_with<F, Fut>(max_attempts: u32, mut is_taken: F) -> AppResult<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, sqlx::Error>>,
{
    let max_attempts = max_attempts.max(1);

    for attempt in 1..=max_attempts {
        let candidate = {
            let mut rng = rand::rng();
            generate_case_number(Utc::now(), &mut rng)
        };

        if !is_taken(candidate.clone()).await? {
            tracing::debug!(attempt, case_number = %candidate, "Allocated case number");
            return Ok(candidate);
        }

        tracing::warn!(
            attempt,
            max_attempts,
            case_number = %candidate,
            "Case number collision, regenerating"
        );
    }

    Err(AppError::Core(CoreError::Conflict(format!(
        "Could not allocate a unique case number after {max_attempts} attempts"
    ))))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use assert_matches::assert_matches;
    use caseboard_core::case::is_valid_case_number;

    use super::*;

    #[tokio::test]
    async fn first_free_candidate_is_returned() {
        let number = allocate_with(5, |_| async { Ok(false) }).await.unwrap();
        assert!(is_valid_case_number(&number), "unexpected shape: {number}");
    }

    #[tokio::test]
    async fn collisions_are_retried() {
        let calls = AtomicU32::new(0);
        let number = allocate_with(5, |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(n < 2) }
        })
        .await
        .unwrap();

        assert!(is_valid_case_number(&number));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhaustion_is_a_conflict() {
        let calls = AtomicU32::new(0);
        let result = allocate_with(4, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(true) }
        })
        .await;

        assert_matches!(result, Err(AppError::Core(CoreError::Conflict(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let calls = AtomicU32::new(0);
        let result = allocate_with(0, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(false) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let result = allocate_with(3, |_| async { Err(sqlx::Error::PoolTimedOut) }).await;
        assert_matches!(result, Err(AppError::Database(sqlx::Error::PoolTimedOut)));
    }
}
