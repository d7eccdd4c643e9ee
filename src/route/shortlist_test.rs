use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::test_utils::{generate_test_profile, init_test_state},
    factory::venue::VenueFactory,
    init_openapi_route,
    model::profile::ProfileRole,
    settings::get_config,
};

#[sqlx::test]
async fn test_toggle_shortlist(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool.clone(), &config)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let mut db = app_state.db.acquire().await?;
    let couple = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "couple@local.com",
        "password",
        ProfileRole::User,
    )
    .await?;
    let venue = VenueFactory::new().generate_one(&pool, ()).await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);
    let payload = json!({"venue_id": venue.id.to_string(), "event_type": "wedding"});

    // When
    let resp = cli
        .post("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .body_json(&payload)
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    resp.assert_json(json!({"action": "added", "venue_id": venue.id.to_string()}))
        .await;
    let resp = cli
        .get("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("counts").assert_i64(1);
    json.value()
        .object()
        .get("results")
        .array()
        .get(0)
        .object()
        .get("venue")
        .object()
        .get("slug")
        .assert_string(&venue.slug);

    // When toggled again
    let resp = cli
        .post("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .body_json(&payload)
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    resp.assert_json(json!({"action": "removed", "venue_id": venue.id.to_string()}))
        .await;
    let resp = cli
        .get("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .send()
        .await;
    resp.json()
        .await
        .value()
        .object()
        .get("counts")
        .assert_i64(0);
    Ok(())
}

#[sqlx::test]
async fn test_toggle_shortlist_invalid_venue(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool, &config)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let mut db = app_state.db.acquire().await?;
    let couple = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "couple@local.com",
        "password",
        ProfileRole::User,
    )
    .await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .body_json(&json!({"venue_id": "nope"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);

    // When
    let resp = cli
        .post("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .body_json(&json!({"venue_id": "0195b3c4-0000-7000-8000-000000000000"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[sqlx::test]
async fn test_delete_shortlist(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool.clone(), &config)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let mut db = app_state.db.acquire().await?;
    let couple = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "couple@local.com",
        "password",
        ProfileRole::User,
    )
    .await?;
    let venue = VenueFactory::new().generate_one(&pool, ()).await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);
    let resp = cli
        .post("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .body_json(&json!({"venue_id": venue.id.to_string()}))
        .send()
        .await;
    resp.assert_status_is_ok();

    // When
    let resp = cli
        .delete("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .query("venue_id", &venue.id.to_string())
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    resp.assert_json(json!({
        "message": "Venue removed from shortlist",
        "data": {"action": "removed", "venue_id": venue.id.to_string()}
    }))
    .await;
    let resp = cli
        .get("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .send()
        .await;
    resp.json()
        .await
        .value()
        .object()
        .get("counts")
        .assert_i64(0);

    // When removed twice
    let resp = cli
        .delete("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .query("venue_id", &venue.id.to_string())
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();

    // When venue id missing
    let resp = cli
        .delete("/api/shortlist")
        .header("authorization", format!("Bearer {}", couple.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "Venue ID is required"}))
        .await;

    // When not logged in
    let resp = cli
        .delete("/api/shortlist")
        .query("venue_id", &venue.id.to_string())
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}
