//! HTTP-level integration tests for cases and their nested resources,
//! evidence, the checklist, and the aggregate endpoints.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use caseboard_api::router::build_app_router;
use caseboard_core::case::is_valid_case_number;
use caseboard_events::ActivityPersistence;
use common::{body_json, delete, get, patch_json, post_json, put_json};
use sqlx::PgPool;

/// Create a case through the API and return its detail JSON.
async fn create_case(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/cases", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn minimal_case() -> serde_json::Value {
    serde_json::json!({
        "case_type": "fraud",
        "incident_date": "2024-03-01",
        "summary": "Invoice redirection fraud",
    })
}

// ---------------------------------------------------------------------------
// Composite create + detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn composite_create_assembles_full_detail(pool: PgPool) {
    let existing = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/suspects",
            serde_json::json!({"name": "Known Actor"}),
        )
        .await,
    )
    .await;

    let detail = create_case(
        &pool,
        serde_json::json!({
            "case_type": "data_breach",
            "incident_date": "2024-05-10",
            "summary": "Customer database exfiltrated",
            "victim": {"name": "Acme Ltd", "contact": "it@acme.test"},
            "suspects": [
                {"suspect_id": existing["id"], "involvement_level": "primary"},
                {"suspect": {"name": "New Person"}, "relationship_to_case": "former contractor"}
            ],
            "evidence": [
                {"file_name": "firewall.log", "file_size": 2048},
                {"file_name": "disk.img", "evidence_type": "image"}
            ]
        }),
    )
    .await;

    let case_number = detail["case_number"].as_str().unwrap();
    assert!(is_valid_case_number(case_number), "bad case number {case_number}");
    assert_eq!(detail["status"], "open");
    assert_eq!(detail["victim"]["name"], "Acme Ltd");
    assert_eq!(detail["victim_id"], detail["victim"]["id"]);

    let suspects = detail["suspects"].as_array().unwrap();
    assert_eq!(suspects.len(), 2);
    assert_eq!(suspects[0]["name"], "Known Actor");
    assert_eq!(suspects[0]["involvement_level"], "primary");
    assert_eq!(suspects[1]["name"], "New Person");
    assert_eq!(suspects[1]["involvement_level"], "unknown");

    let evidence = detail["evidence"].as_array().unwrap();
    assert_eq!(evidence[0]["evidence_number"], format!("{case_number}-E001"));
    assert_eq!(evidence[0]["evidence_type"], "log");
    assert_eq!(evidence[1]["evidence_number"], format!("{case_number}-E002"));
    assert_eq!(evidence[1]["evidence_type"], "image");

    // Default templates: collection, log analysis, reporting.
    let actions = detail["forensic_actions"].as_array().unwrap();
    let template_ids: Vec<&str> = actions
        .iter()
        .map(|a| a["template_id"].as_str().unwrap())
        .collect();
    assert_eq!(template_ids, ["1", "2", "5"]);
    assert_eq!(detail["progress_pct"], 0);

    // The same shape comes back from GET.
    let id = detail["id"].as_i64().unwrap();
    let response = get(common::build_test_app(pool), &format!("/api/v1/cases/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["case_number"], case_number);
    assert_eq!(fetched["suspects"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_empty_template_list_creates_no_actions(pool: PgPool) {
    let mut body = minimal_case();
    body["action_template_ids"] = serde_json::json!([]);
    let detail = create_case(&pool, body).await;

    assert!(detail["forensic_actions"].as_array().unwrap().is_empty());
    assert!(detail["victim"].is_null());
    assert_eq!(detail["progress_pct"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_case_validation_errors(pool: PgPool) {
    let tomorrow = chrono::Utc::now().date_naive() + chrono::Duration::days(1);
    let bodies = [
        serde_json::json!({"case_type": "fraud", "incident_date": tomorrow, "summary": "x"}),
        serde_json::json!({"case_type": "fraud", "incident_date": "2024-01-01", "summary": "  "}),
        serde_json::json!({
            "case_type": "fraud", "incident_date": "2024-01-01", "summary": "x",
            "action_template_ids": ["9"]
        }),
        serde_json::json!({
            "case_type": "fraud", "incident_date": "2024-01-01", "summary": "x",
            "suspects": [{"involvement_level": "witness"}]
        }),
        serde_json::json!({
            "case_type": "fraud", "incident_date": "2024-01-01", "summary": "x",
            "evidence": [{"file_name": "a.bin", "file_hash_sha256": "not-a-hash"}]
        }),
    ];

    for body in bodies {
        let response =
            post_json(common::build_test_app(pool.clone()), "/api/v1/cases", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cases")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_existing_suspect_rolls_back_creation(pool: PgPool) {
    let mut body = minimal_case();
    body["victim"] = serde_json::json!({"name": "Rolled Back"});
    body["suspects"] = serde_json::json!([{"suspect_id": 999999}]);

    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/cases", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");

    let victims: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM victims")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(victims, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_case_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/cases/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// List, update, status, delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_cases_filters_by_status_and_type(pool: PgPool) {
    let fraud = create_case(&pool, minimal_case()).await;
    let mut malware_body = minimal_case();
    malware_body["case_type"] = serde_json::json!("malware");
    malware_body["victim"] = serde_json::json!({"name": "Hospital"});
    create_case(&pool, malware_body).await;

    let fraud_id = fraud["id"].as_i64().unwrap();
    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/cases/{fraud_id}/status"),
        serde_json::json!({"status": "closed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "closed");

    let all = body_json(get(common::build_test_app(pool.clone()), "/api/v1/cases").await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["case_type"], "malware", "newest first");
    assert_eq!(all[0]["victim_name"], "Hospital");
    assert!(all[1]["victim_name"].is_null());

    let closed =
        body_json(get(common::build_test_app(pool.clone()), "/api/v1/cases?status=closed").await)
            .await;
    assert_eq!(closed.as_array().unwrap().len(), 1);
    assert_eq!(closed[0]["id"], fraud_id);

    let open_malware = body_json(
        get(
            common::build_test_app(pool.clone()),
            "/api/v1/cases?status=open&case_type=malware",
        )
        .await,
    )
    .await;
    assert_eq!(open_malware.as_array().unwrap().len(), 1);

    let response = get(common::build_test_app(pool), "/api/v1/cases?status=bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_case_keeps_case_number(pool: PgPool) {
    let detail = create_case(&pool, minimal_case()).await;
    let id = detail["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/cases/{id}"),
        serde_json::json!({
            "summary": "Updated summary",
            "status": "in_progress",
            "case_number": "CASE-IGNORED"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["summary"], "Updated summary");
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["case_number"], detail["case_number"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_case_cascades_children(pool: PgPool) {
    let mut body = minimal_case();
    body["evidence"] = serde_json::json!([{"file_name": "mail.eml"}]);
    let detail = create_case(&pool, body).await;
    let id = detail["id"].as_i64().unwrap();

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/cases/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let evidence: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM evidence")
        .fetch_one(&pool)
        .await
        .unwrap();
    let actions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM forensic_actions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!((evidence, actions), (0, 0));

    let response = delete(common::build_test_app(pool), &format!("/api/v1/cases/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Case suspects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn link_update_and_unlink_suspects(pool: PgPool) {
    let detail = create_case(&pool, minimal_case()).await;
    let case_id = detail["id"].as_i64().unwrap();
    let base = format!("/api/v1/cases/{case_id}/suspects");

    let response = post_json(
        common::build_test_app(pool.clone()),
        &base,
        serde_json::json!({"suspect": {"name": "Fresh Suspect"}, "involvement_level": "secondary"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let link = body_json(response).await;
    let suspect_id = link["suspect_id"].as_i64().unwrap();
    assert_eq!(link["involvement_level"], "secondary");

    // Linking the same suspect twice violates the unique pair.
    let response = post_json(
        common::build_test_app(pool.clone()),
        &base,
        serde_json::json!({"suspect_id": suspect_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("{base}/{suspect_id}"),
        serde_json::json!({"involvement_level": "witness"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = body_json(get(common::build_test_app(pool.clone()), &base).await).await;
    assert_eq!(listed[0]["name"], "Fresh Suspect");
    assert_eq!(listed[0]["involvement_level"], "witness");

    let response = delete(common::build_test_app(pool.clone()), &format!("{base}/{suspect_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The suspect record survives the unlink.
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/suspects/{suspect_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn link_events_share_the_link_id(pool: PgPool) {
    let state = common::test_state(pool.clone());
    let mut events = state.event_bus.subscribe();
    let app = build_app_router(state, &common::test_config());

    let response = post_json(app.clone(), "/api/v1/cases", minimal_case()).await;
    let case_id = body_json(response).await["id"].as_i64().unwrap();
    let base = format!("/api/v1/cases/{case_id}/suspects");

    // Unlinked suspects push the suspect sequence ahead of the link sequence.
    for name in ["Bystander One", "Bystander Two"] {
        let response = post_json(app.clone(), "/api/v1/suspects", serde_json::json!({"name": name})).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = post_json(
        app.clone(),
        &base,
        serde_json::json!({"suspect": {"name": "Event Suspect"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let link = body_json(response).await;
    let link_id = link["id"].as_i64().unwrap();
    let suspect_id = link["suspect_id"].as_i64().unwrap();
    assert_ne!(link_id, suspect_id);

    let response = delete(app, &format!("{base}/{suspect_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let mut link_events = Vec::new();
    while let Ok(event) = events.try_recv() {
        if event.entity_type == "case_suspect" {
            link_events.push((event.action, event.entity_id));
        }
    }
    assert_eq!(
        link_events,
        vec![
            ("CREATE".to_string(), link_id),
            ("DELETE".to_string(), link_id),
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn link_to_missing_case_or_suspect_returns_404(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/cases/999999/suspects",
        serde_json::json!({"suspect": {"name": "Nobody"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let detail = create_case(&pool, minimal_case()).await;
    let case_id = detail["id"].as_i64().unwrap();
    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/cases/{case_id}/suspects"),
        serde_json::json!({"suspect_id": 999999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Checklist
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_action_updates_progress(pool: PgPool) {
    let detail = create_case(&pool, minimal_case()).await;
    let case_id = detail["id"].as_i64().unwrap();
    let action_id = detail["forensic_actions"][0]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/cases/{case_id}/actions/{action_id}");

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({"is_completed": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let action = body_json(response).await;
    assert_eq!(action["status"], "completed");
    assert!(action["completed_at"].is_string());

    let detail = body_json(
        get(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/cases/{case_id}"),
        )
        .await,
    )
    .await;
    assert_eq!(detail["progress_pct"], 33);

    let response = patch_json(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({"is_completed": false}),
    )
    .await;
    let action = body_json(response).await;
    assert_eq!(action["status"], "pending");
    assert!(action["completed_at"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_template_and_custom_actions(pool: PgPool) {
    let mut body = minimal_case();
    body["action_template_ids"] = serde_json::json!([]);
    let detail = create_case(&pool, body).await;
    let case_id = detail["id"].as_i64().unwrap();
    let base = format!("/api/v1/cases/{case_id}/actions");

    let response = post_json(
        common::build_test_app(pool.clone()),
        &base,
        serde_json::json!({"template_id": "4"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["action_type"], "Malware Analysis");

    let response = post_json(
        common::build_test_app(pool.clone()),
        &base,
        serde_json::json!({"action_type": "Interview", "description": "Talk to the IT lead"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let custom = body_json(response).await;
    assert!(custom["template_id"].is_null());

    let response = post_json(
        common::build_test_app(pool.clone()),
        &base,
        serde_json::json!({"action_type": "Interview"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listed = body_json(get(common::build_test_app(pool.clone()), &base).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let custom_id = custom["id"].as_i64().unwrap();
    let response = delete(common::build_test_app(pool.clone()), &format!("{base}/{custom_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/cases/999999/actions",
        serde_json::json!({"template_id": "1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Evidence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn evidence_numbering_continues_after_composite_create(pool: PgPool) {
    let mut body = minimal_case();
    body["evidence"] = serde_json::json!([{"file_name": "a.pcap"}]);
    let detail = create_case(&pool, body).await;
    let case_id = detail["id"].as_i64().unwrap();
    let case_number = detail["case_number"].as_str().unwrap().to_string();

    let hash = "AB".repeat(32);
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/cases/{case_id}/evidence"),
        serde_json::json!({
            "file_name": "memory.raw",
            "file_size": 1572864,
            "file_hash_sha256": hash,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let item = body_json(response).await;
    assert_eq!(item["evidence_number"], format!("{case_number}-E002"));
    assert_eq!(item["evidence_type"], "memory_dump");
    assert_eq!(item["file_hash_sha256"], "ab".repeat(32));
    assert_eq!(item["file_size_mb"], "1.50 MB");

    let all = body_json(get(common::build_test_app(pool.clone()), "/api/v1/evidence").await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["case_number"], case_number.as_str());

    let scoped = body_json(
        get(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/cases/{case_id}/evidence"),
        )
        .await,
    )
    .await;
    assert_eq!(scoped[0]["evidence_type"], "network_capture");

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/cases/999999/evidence",
        serde_json::json!({"file_name": "x.bin"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_file_size_is_rejected(pool: PgPool) {
    let detail = create_case(&pool, minimal_case()).await;
    let case_id = detail["id"].as_i64().unwrap();

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/cases/{case_id}/evidence"),
        serde_json::json!({"file_name": "x.bin", "file_size": -1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detect_type_classifies_by_mime_then_name(pool: PgPool) {
    let cases = [
        ("/api/v1/evidence/detect-type?file_name=photo.bin&mime=image/png", "image"),
        ("/api/v1/evidence/detect-type?file_name=report.pdf&mime=application/pdf", "document"),
        ("/api/v1/evidence/detect-type?file_name=auth.log", "log"),
        ("/api/v1/evidence/detect-type?file_name=capture.pcap", "network_capture"),
        ("/api/v1/evidence/detect-type?file_name=archive.zip", "file"),
    ];

    for (uri, expected) in cases {
        let response = get(common::build_test_app(pool.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["evidence_type"], expected, "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detect_type_without_name_or_mime_is_bad_request(pool: PgPool) {
    for uri in [
        "/api/v1/evidence/detect-type",
        "/api/v1/evidence/detect-type?file_name=%20%20&mime=",
    ] {
        let response = get(common::build_test_app(pool.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_stats_reflect_cases(pool: PgPool) {
    let mut body = minimal_case();
    body["victim"] = serde_json::json!({"name": "Victim"});
    create_case(&pool, body).await;

    let response = get(common::build_test_app(pool), "/api/v1/dashboard/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let stats = &body_json(response).await["data"];
    assert_eq!(stats["total_cases"], 1);
    assert_eq!(stats["open_cases"], 1);
    assert_eq!(stats["total_victims"], 1);
    assert_eq!(stats["total_actions"], 3);
    assert_eq!(stats["action_completion_pct"], 0);
    assert_eq!(stats["case_completion_pct"], 0);
    assert_eq!(stats["case_types"].as_array().unwrap().len(), 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mutations_land_in_activity_log(pool: PgPool) {
    let state = common::test_state(pool.clone());
    let persistence = tokio::spawn(ActivityPersistence::run(
        pool.clone(),
        state.event_bus.subscribe(),
    ));
    let app = build_app_router(state, &common::test_config());

    let response = post_json(app.clone(), "/api/v1/victims", serde_json::json!({"name": "Logged"})).await;
    let victim_id = body_json(response).await["id"].as_i64().unwrap();

    let uri = format!("/api/v1/activity?entity_type=victim&entity_id={victim_id}");
    let mut page = serde_json::Value::Null;
    for _ in 0..50 {
        page = body_json(get(app.clone(), &uri).await).await;
        if page["data"]["total"] == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(page["data"]["total"], 1);
    let entry = &page["data"]["items"][0];
    assert_eq!(entry["action"], "CREATE");
    assert_eq!(entry["user_id"], common::TEST_USER_ID);
    assert_eq!(entry["details"]["name"], "Logged");

    drop(app);
    persistence.abort();
}
