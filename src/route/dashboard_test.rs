use chrono::{Duration, Local};
use poem::{http::StatusCode, test::TestClient};
use sqlx::PgPool;

use crate::{
    core::test_utils::{generate_test_profile, init_test_state},
    factory::{
        destination::DestinationFactory, inquiry::InquiryFactory, review::ReviewFactory,
        venue::VenueFactory,
    },
    init_openapi_route,
    model::{inquiry::Inquiry, profile::ProfileRole},
    settings::get_config,
};

#[sqlx::test]
async fn test_dashboard_counts(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool.clone(), &config)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let mut db = app_state.db.acquire().await?;
    let admin = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "admin@local.com",
        "password",
        ProfileRole::Admin,
    )
    .await?;
    let vendor = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "vendor@local.com",
        "password",
        ProfileRole::Vendor,
    )
    .await?;
    VenueFactory::new().generate_many(&pool, 2, ()).await?;
    DestinationFactory::new().generate_many(&pool, 3, ()).await?;
    ReviewFactory::new().generate_many(&pool, 2, ()).await?;
    let mut factory = InquiryFactory::new();
    // 4 this week, 2 last week
    factory.modified_many(|data, idx, _| {
        let created_at = if idx < 4 {
            Local::now().fixed_offset() - Duration::days(1)
        } else {
            Local::now().fixed_offset() - Duration::days(10)
        };
        Inquiry {
            created_at,
            updated_at: created_at,
            ..data.clone()
        }
    });
    factory.generate_many(&pool, 6, ()).await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/admin/dashboard")
        .header("authorization", format!("Bearer {}", admin.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let data = json.value().object();
    data.get("total_inquiries").assert_i64(6);
    data.get("new_inquiries").assert_i64(6);
    data.get("total_reviews").assert_i64(2);
    data.get("pending_reviews").assert_i64(2);
    data.get("total_venues").assert_i64(2);
    data.get("total_destinations").assert_i64(3);
    data.get("inquiries_this_week").assert_i64(4);
    data.get("inquiries_last_week").assert_i64(2);
    data.get("weekly_change").assert_i64(100);
    data.get("recent_inquiries").array().assert_len(5);

    // When vendor
    let resp = cli
        .get("/api/admin/dashboard")
        .header("authorization", format!("Bearer {}", vendor.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);
    Ok(())
}
