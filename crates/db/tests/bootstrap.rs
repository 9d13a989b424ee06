use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    caseboard_db::health_check(&pool).await.unwrap();

    let tables = [
        "victims",
        "suspects",
        "cases",
        "case_suspects",
        "evidence",
        "forensic_actions",
        "activity_logs",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The shared trigger function bumps `updated_at` on every UPDATE.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger_fires(pool: PgPool) {
    let (id, before): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO victims (name, created_by, created_at, updated_at)
         VALUES ('Trigger', 1, NOW() - INTERVAL '1 hour', NOW() - INTERVAL '1 hour')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let (updated_at,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE victims SET name = 'Trigger 2' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(updated_at > before);
}
