use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::test_utils::{generate_test_profile, init_test_state},
    factory::{guest::GuestFactory, task::TaskFactory, wedding::WeddingFactory},
    init_openapi_route,
    model::{guest::Guest, profile::ProfileRole, task::Task, wedding::Wedding},
    settings::get_config,
};

#[sqlx::test]
async fn test_create_and_list_wedding(pool: PgPool) -> anyhow::Result<()> {
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
        .post("/api/weddings")
        .header("authorization", format!("Bearer {}", couple.token))
        .body_json(&json!({
            "bride_name": "Asha",
            "groom_name": "Rohan Mehta",
            "wedding_date": "2027-02-14",
            "total_budget": 2_500_000,
            "currency": "inr"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let data = json.value().object().get("data").object();
    data.get("currency").assert_string("INR");
    data.get("planning_status").assert_string("planning");
    data.get("wedding_date").assert_string("2027-02-14");
    let slug = data.get("website_slug").string().to_string();
    assert!(slug.starts_with("asha-rohan-mehta-"));
    let wedding_id = data.get("id").string().to_string();

    // When
    let resp = cli
        .get("/api/weddings")
        .header("authorization", format!("Bearer {}", couple.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("counts").assert_i64(1);

    // When
    let resp = cli
        .get("/api/weddings/members")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", couple.token))
        .send()
        .await;

    // Expect creator is the accepted owner
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let members = json.value().array();
    members.assert_len(1);
    let owner = members.get(0).object();
    owner.get("role").assert_string("owner");
    owner.get("invitation_status").assert_string("accepted");
    owner.get("email").assert_string("couple@local.com");

    // When names missing
    let resp = cli
        .post("/api/weddings")
        .header("authorization", format!("Bearer {}", couple.token))
        .body_json(&json!({"bride_name": "Asha", "groom_name": " "}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "Bride and groom names are required"}))
        .await;
    Ok(())
}

#[sqlx::test]
async fn test_wedding_hidden_from_non_member(pool: PgPool) -> anyhow::Result<()> {
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
    let stranger = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "stranger@local.com",
        "password",
        ProfileRole::User,
    )
    .await?;
    let wedding = WeddingFactory::new()
        .generate_one(&pool, owner.profile.id)
        .await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/weddings/detail")
        .query("wedding_id", &wedding.id.to_string())
        .header("authorization", format!("Bearer {}", stranger.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(json!({
        "message": format!("wedding with id = {} not found", wedding.id)
    }))
    .await;

    // When
    let resp = cli
        .get("/api/weddings")
        .header("authorization", format!("Bearer {}", stranger.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("counts").assert_i64(0);

    // When
    let resp = cli
        .get("/api/weddings/detail")
        .query("wedding_id", &"not-a-uuid")
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "Invalid wedding id"}))
        .await;

    // When
    let resp = cli
        .get("/api/weddings/detail")
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "Wedding ID is required"}))
        .await;
    Ok(())
}

#[sqlx::test]
async fn test_family_member_is_read_only(pool: PgPool) -> anyhow::Result<()> {
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
    let family = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "family@local.com",
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
        .post("/api/weddings/members")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"email": "family@local.com", "role": "family"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CREATED);
    resp.json()
        .await
        .value()
        .object()
        .get("message")
        .assert_string("Member added successfully");

    // When added twice
    let resp = cli
        .post("/api/weddings/members")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"email": "family@local.com", "role": "planner"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "Profile is already a member of this wedding"}))
        .await;

    // When family reads
    let resp = cli
        .get("/api/weddings/detail")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", family.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();

    // When family edits
    let resp = cli
        .put("/api/weddings")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", family.token))
        .body_json(&json!({"bride_name": "Someone", "groom_name": "Else"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);

    // When family adds a member
    let resp = cli
        .post("/api/weddings/members")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", family.token))
        .body_json(&json!({"email": "owner@local.com", "role": "viewer"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);

    // When family deletes the wedding
    let resp = cli
        .delete("/api/weddings")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", family.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);

    // When family leaves
    let resp = cli
        .delete("/api/weddings/members")
        .query("wedding_id", &wedding_id)
        .query("profile_id", &family.profile.id.to_string())
        .header("authorization", format!("Bearer {}", family.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NO_CONTENT);
    let resp = cli
        .get("/api/weddings/detail")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", family.token))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[sqlx::test]
async fn test_owner_membership_rules(pool: PgPool) -> anyhow::Result<()> {
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
        .post("/api/weddings/members")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"email": "someone@local.com", "role": "owner"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "A wedding has only one owner"}))
        .await;

    // When
    let resp = cli
        .post("/api/weddings/members")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .body_json(&json!({"email": "nobody@local.com", "role": "planner"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "profile with email = nobody@local.com not found"}))
        .await;

    // When
    let resp = cli
        .delete("/api/weddings/members")
        .query("wedding_id", &wedding_id)
        .query("profile_id", &owner.profile.id.to_string())
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "The wedding owner cannot be removed"}))
        .await;

    // When
    let resp = cli
        .delete("/api/weddings")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NO_CONTENT);
    let resp = cli
        .get("/api/weddings/detail")
        .query("wedding_id", &wedding_id)
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[sqlx::test]
async fn test_wedding_stats(pool: PgPool) -> anyhow::Result<()> {
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
    let mut factory = WeddingFactory::new();
    factory.modified_one(|data, _| Wedding {
        wedding_date: None,
        ..data.clone()
    });
    let wedding = factory.generate_one(&pool, owner.profile.id).await?;
    let mut guests = GuestFactory::new();
    guests.modified_many(|data, idx, _| Guest {
        status: match idx {
            0 => "confirmed",
            1 => "declined",
            _ => "invited",
        }
        .to_string(),
        ..data.clone()
    });
    guests.generate_many(&pool, 4, wedding.id).await?;
    let mut tasks = TaskFactory::new();
    tasks.modified_many(|data, idx, _| Task {
        status: if idx == 0 { "completed" } else { "pending" }.to_string(),
        ..data.clone()
    });
    tasks.generate_many(&pool, 3, wedding.id).await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/weddings/stats")
        .query("wedding_id", &wedding.id.to_string())
        .header("authorization", format!("Bearer {}", owner.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let stats = json.value().object();
    stats.get("total_guests").assert_i64(4);
    stats.get("confirmed_guests").assert_i64(1);
    stats.get("pending_rsvps").assert_i64(2);
    stats.get("pending_tasks").assert_i64(2);
    stats.get("completed_tasks").assert_i64(1);
    Ok(())
}
