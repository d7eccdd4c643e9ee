use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::test_utils::{generate_test_profile, init_test_state},
    factory::{budget_item::BudgetItemFactory, wedding::WeddingFactory},
    init_openapi_route,
    model::{budget_item::BudgetItem, profile::ProfileRole, wedding::Wedding},
    settings::get_config,
};

#[sqlx::test]
async fn test_budget_overview(pool: PgPool) -> anyhow::Result<()> {
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
    let mut weddings = WeddingFactory::new();
    weddings.modified_one(|data, _| Wedding {
        total_budget: Some(1_000_000),
        ..data.clone()
    });
    let wedding = weddings.generate_one(&pool, owner.profile.id).await?;
    let mut items = BudgetItemFactory::new();
    items.modified_many(|data, idx, _| BudgetItem {
        category: Some(if idx == 0 { "venue-catering" } else { "decoration" }.to_string()),
        estimated_cost: 200_000,
        actual_cost: if idx == 0 { Some(250_000) } else { None },
        amount_paid: 100_000,
        ..data.clone()
    });
    items.generate_many(&pool, 3, wedding.id).await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/weddings/budget")
        .query("wedding_id", &wedding.id.to_string())
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let overview = json.value().object();
    overview.get("total_budget").assert_i64(1_000_000);
    overview.get("total_estimated").assert_i64(600_000);
    overview.get("total_actual").assert_i64(250_000);
    overview.get("total_paid").assert_i64(300_000);
    overview.get("remaining").assert_i64(350_000);
    overview.get("items").array().assert_len(3);
    let categories = overview.get("categories").array();
    categories.assert_len(11);
    let totals: Vec<(String, i64)> = (0..categories.len())
        .map(|idx| {
            let category = categories.get(idx).object();
            (
                category.get("id").string().to_string(),
                category.get("total").i64(),
            )
        })
        .collect();
    assert!(totals.contains(&("decoration".to_string(), 400_000)));
    assert!(totals.contains(&("venue-catering".to_string(), 250_000)));
    Ok(())
}

#[sqlx::test]
async fn test_budget_item_lifecycle(pool: PgPool) -> anyhow::Result<()> {
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
        .post("/api/weddings/budget")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({
            "name": "Mehendi artist",
            "category": "makeup",
            "estimated_cost": 80_000,
            "amount_paid": 20_000
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let data = json.value().object().get("data").object();
    data.get("payment_status").assert_string("partial");
    let item_id = data.get("id").string().to_string();

    // When
    let resp = cli
        .put("/api/weddings/budget")
        .query("wedding_id", &wedding_id)
        .query("item_id", &item_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"name": "Mehendi artist", "amount_paid": 80_000}))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value()
        .object()
        .get("data")
        .object()
        .get("payment_status")
        .assert_string("paid");

    // When
    let resp = cli
        .post("/api/weddings/budget")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"name": "Fireworks", "category": "fireworks"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "Unknown budget category fireworks"}))
        .await;

    // When
    let resp = cli
        .delete("/api/weddings/budget")
        .query("wedding_id", &wedding_id)
        .query("item_id", &item_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NO_CONTENT);
    Ok(())
}
