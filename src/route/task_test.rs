use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::test_utils::{generate_test_profile, init_test_state},
    factory::{task::TaskFactory, wedding::WeddingFactory},
    init_openapi_route,
    model::{profile::ProfileRole, task::Task},
    settings::get_config,
};

#[sqlx::test]
async fn test_task_completion(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool.clone(), &config)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let mut db = app_state.db.acquire().await?;
    let owner = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "owner@local.com",
        "password",
        ProfileRole::User,
    )
    .await?;
    let wedding = WeddingFactory::new()
        .generate_one(&pool, owner.profile.id)
        .await?;
    let wedding_id = wedding.id.to_string();
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/weddings/tasks")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({
            "title": "Book sangeet choreographer",
            "due_date": "2026-12-01",
            "priority": "high"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let data = json.value().object().get("data").object();
    data.get("status").assert_string("pending");
    data.get("priority").assert_string("high");
    data.get("completed_at").assert_null();
    let task_id = data.get("id").string().to_string();

    // When
    let resp = cli
        .put("/api/weddings/tasks/status")
        .query("wedding_id", &wedding_id)
        .query("task_id", &task_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"status": "completed"}))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let data = json.value().object().get("data").object();
    data.get("status").assert_string("completed");
    assert!(!data.get("completed_at").string().is_empty());

    // When reopened
    let resp = cli
        .put("/api/weddings/tasks")
        .query("wedding_id", &wedding_id)
        .query("task_id", &task_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"title": "Book sangeet choreographer", "status": "in_progress"}))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let data = json.value().object().get("data").object();
    data.get("status").assert_string("in_progress");
    data.get("completed_at").assert_null();

    // When
    let resp = cli
        .put("/api/weddings/tasks")
        .query("wedding_id", &wedding_id)
        .query("task_id", &task_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"title": "Book sangeet choreographer", "due_date": "soon"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "Invalid due date"}))
        .await;

    // When
    let resp = cli
        .delete("/api/weddings/tasks")
        .query("wedding_id", &wedding_id)
        .query("task_id", &task_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NO_CONTENT);
    Ok(())
}

#[sqlx::test]
async fn test_filter_tasks(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool.clone(), &config)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let mut db = app_state.db.acquire().await?;
    let owner = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "owner@local.com",
        "password",
        ProfileRole::User,
    )
    .await?;
    let wedding = WeddingFactory::new()
        .generate_one(&pool, owner.profile.id)
        .await?;
    let mut factory = TaskFactory::new();
    factory.modified_many(|data, idx, _| Task {
        priority: if idx < 2 { "urgent" } else { "low" }.to_string(),
        display_order: idx as i32,
        ..data.clone()
    });
    factory.generate_many(&pool, 4, wedding.id).await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/weddings/tasks")
        .query("wedding_id", &wedding.id.to_string())
        .query("priority", &"urgent")
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("counts").assert_i64(2);
    json.value().object().get("results").array().assert_len(2);
    Ok(())
}
