use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::test_utils::{generate_test_profile, init_test_state},
    factory::{guest::GuestFactory, wedding::WeddingFactory},
    init_openapi_route,
    model::{guest::Guest, profile::ProfileRole},
    settings::get_config,
};

#[sqlx::test]
async fn test_guest_crud(pool: PgPool) -> anyhow::Result<()> {
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
        .post("/api/weddings/guests")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({
            "first_name": "Meera",
            "last_name": "Kapoor",
            "side": "bride",
            "category": "close_family",
            "has_plus_one": true,
            "plus_one_name": "Arjun"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let data = json.value().object().get("data").object();
    data.get("status").assert_string("pending");
    data.get("plus_one_name").assert_string("Arjun");
    let guest_id = data.get("id").string().to_string();

    // When
    let resp = cli
        .put("/api/weddings/guests/status")
        .query("wedding_id", &wedding_id)
        .query("guest_id", &guest_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"status": "confirmed"}))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value()
        .object()
        .get("message")
        .assert_string("Guest status updated");
    json.value()
        .object()
        .get("data")
        .object()
        .get("status")
        .assert_string("confirmed");

    // When
    let resp = cli
        .put("/api/weddings/guests")
        .query("wedding_id", &wedding_id)
        .query("guest_id", &guest_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"first_name": "Meera", "table_number": 0}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "Table number must be positive"}))
        .await;

    // When
    let resp = cli
        .delete("/api/weddings/guests")
        .query("wedding_id", &wedding_id)
        .query("guest_id", &guest_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NO_CONTENT);
    let resp = cli
        .delete("/api/weddings/guests")
        .query("wedding_id", &wedding_id)
        .query("guest_id", &guest_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(json!({
        "message": format!("guest with id = {} not found", guest_id)
    }))
    .await;
    Ok(())
}

#[sqlx::test]
async fn test_filter_guests_within_wedding(pool: PgPool) -> anyhow::Result<()> {
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
    let other = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "other@local.com",
        "password",
        ProfileRole::User,
    )
    .await?;
    let wedding = WeddingFactory::new()
        .generate_one(&pool, owner.profile.id)
        .await?;
    let other_wedding = WeddingFactory::new()
        .generate_one(&pool, other.profile.id)
        .await?;
    let mut factory = GuestFactory::new();
    factory.modified_many(|data, idx, _| Guest {
        side: Some(if idx % 2 == 0 { "bride" } else { "groom" }.to_string()),
        ..data.clone()
    });
    factory.generate_many(&pool, 5, wedding.id).await?;
    let other_guests = factory.generate_many(&pool, 2, other_wedding.id).await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/weddings/guests")
        .query("wedding_id", &wedding.id.to_string())
        .query("side", &"bride")
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("counts").assert_i64(3);

    // When another wedding's guest is addressed through this wedding
    let resp = cli
        .put("/api/weddings/guests/status")
        .query("wedding_id", &wedding.id.to_string())
        .query("guest_id", &other_guests[0].id.to_string())
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"status": "declined"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}
