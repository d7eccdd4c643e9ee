use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::test_utils::{generate_test_profile, init_test_state},
    factory::{inquiry::InquiryFactory, venue::VenueFactory},
    init_openapi_route,
    model::{inquiry::Inquiry, profile::ProfileRole, venue::Venue},
    settings::get_config,
};

#[sqlx::test]
async fn test_vendor_sees_own_venues_and_stats(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool.clone(), &config)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let mut db = app_state.db.acquire().await?;
    let vendor = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "vendor@local.com",
        "password",
        ProfileRole::Vendor,
    )
    .await?;
    let mut factory = VenueFactory::new();
    factory.modified_many(|data, idx, vendor_id: Uuid| Venue {
        vendor_id: Some(vendor_id),
        is_active: idx == 0,
        google_rating: 4.0 + idx as f64 * 0.5,
        total_reviews: 10,
        ..data.clone()
    });
    let venues = factory.generate_many(&pool, 2, vendor.profile.id).await?;
    VenueFactory::new().generate_one(&pool, ()).await?;
    let mut inquiry_factory = InquiryFactory::new();
    inquiry_factory.modified_many(|data, idx, venue_id: Uuid| Inquiry {
        venue_id: Some(venue_id),
        status: if idx == 0 { "new" } else { "contacted" }.to_string(),
        ..data.clone()
    });
    inquiry_factory
        .generate_many(&pool, 3, venues[0].id)
        .await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/vendor/venues")
        .header("authorization", format!("Bearer {}", vendor.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("counts").assert_i64(2);

    // When
    let resp = cli
        .get("/api/vendor/stats")
        .header("authorization", format!("Bearer {}", vendor.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    resp.assert_json(json!({
        "total_venues": 2,
        "active_venues": 1,
        "total_inquiries": 3,
        "new_inquiries": 1,
        "total_reviews": 20,
        "avg_rating": 4.25,
        "total_shortlisted": 0
    }))
    .await;

    // When
    let resp = cli
        .get("/api/vendor/inquiries")
        .query("status", &"new")
        .header("authorization", format!("Bearer {}", vendor.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("counts").assert_i64(1);
    Ok(())
}

#[sqlx::test]
async fn test_vendor_cannot_touch_other_listings(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool.clone(), &config)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let mut db = app_state.db.acquire().await?;
    let vendor = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "vendor@local.com",
        "password",
        ProfileRole::Vendor,
    )
    .await?;
    let couple = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "couple@local.com",
        "password",
        ProfileRole::User,
    )
    .await?;
    let mut factory = VenueFactory::new();
    factory.modified_one(|data, vendor_id: Uuid| Venue {
        vendor_id: Some(vendor_id),
        ..data.clone()
    });
    let own = factory.generate_one(&pool, vendor.profile.id).await?;
    let other = VenueFactory::new().generate_one(&pool, ()).await?;
    let mut inquiry_factory = InquiryFactory::new();
    inquiry_factory.modified_one(|data, venue_id: Uuid| Inquiry {
        venue_id: Some(venue_id),
        ..data.clone()
    });
    let own_inquiry = inquiry_factory.generate_one(&pool, own.id).await?;
    let other_inquiry = inquiry_factory.generate_one(&pool, other.id).await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/vendor/venues/toggle-active")
        .query("id", &other.id.to_string())
        .header("authorization", format!("Bearer {}", vendor.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);

    // When
    let resp = cli
        .post("/api/vendor/venues/toggle-active")
        .query("id", &own.id.to_string())
        .header("authorization", format!("Bearer {}", vendor.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    resp.json()
        .await
        .value()
        .object()
        .get("message")
        .assert_string("Venue deactivated successfully");

    // When
    let resp = cli
        .put("/api/vendor/inquiries/status")
        .query("id", &other_inquiry.id.to_string())
        .header("authorization", format!("Bearer {}", vendor.token))
        .body_json(&json!({"status": "contacted"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);
    let resp = cli
        .put("/api/vendor/inquiries/status")
        .query("id", &own_inquiry.id.to_string())
        .header("authorization", format!("Bearer {}", vendor.token))
        .body_json(&json!({"status": "contacted"}))
        .send()
        .await;
    resp.assert_status_is_ok();

    // When plain user
    let resp = cli
        .get("/api/vendor/stats")
        .header("authorization", format!("Bearer {}", couple.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);
    Ok(())
}
