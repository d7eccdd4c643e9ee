use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::{
        security::get_profile_from_token,
        test_utils::{generate_test_profile, init_test_state, insert_profile},
    },
    init_openapi_route,
    model::profile::ProfileRole,
    settings::get_config,
};

#[sqlx::test]
async fn test_signup_then_login(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool, &config)?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When signup
    let resp = cli
        .post("/api/auth/signup")
        .body_json(&json!({
            "email": "Priya@Local.com",
            "password": "password123",
            "full_name": "Priya Sharma"
        }))
        .send()
        .await;

    // Expect signup
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let data = json.value().object().get("data").object();
    data.get("email").assert_string("priya@local.com");
    data.get("role").assert_string("user");

    // When signup with same email
    let resp = cli
        .post("/api/auth/signup")
        .body_json(&json!({"email": "priya@local.com", "password": "password123"}))
        .send()
        .await;

    // Expect duplicate rejected
    resp.assert_status(StatusCode::BAD_REQUEST);

    // When login
    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({"email": "priya@local.com", "password": "password123"}))
        .send()
        .await;

    // Expect login
    resp.assert_status_is_ok();
    let last_sign_in: (Option<chrono::DateTime<chrono::Utc>>,) =
        sqlx::query_as("SELECT last_sign_in_at FROM public.profile WHERE email = $1")
            .bind("priya@local.com")
            .fetch_one(&app_state.db)
            .await?;
    assert!(last_sign_in.0.is_some());
    Ok(())
}

#[sqlx::test]
async fn test_signup_short_password(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool, &config)?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/auth/signup")
        .body_json(&json!({"email": "short@local.com", "password": "1234567"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[sqlx::test]
async fn test_login_then_logout(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool, &config)?;
    let mut db = app_state.db.acquire().await?;
    let profile =
        insert_profile(&mut db, "couple@local.com", "password", ProfileRole::User).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When login
    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({"email": "couple@local.com", "password": "password"}))
        .send()
        .await;

    // Expect login
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let token = json.value().object().get_opt("token");
    assert!(token.is_some());
    let token: String = token.unwrap().deserialize();
    let mut tx = app_state.db.begin().await?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let profile_in_token =
        get_profile_from_token(&mut tx, &mut *redis_conn, Some(token.clone())).await?;
    assert!(profile_in_token.is_some());
    assert_eq!(profile_in_token.unwrap().id, profile.id);

    // When logout
    let resp = cli
        .post("/api/auth/logout")
        .header("authorization", format!("Bearer {}", token))
        .send()
        .await;

    // Expect logout
    resp.assert_status(StatusCode::NO_CONTENT);
    let res: Option<String> = redis::cmd("GET").arg(&token).query(&mut *redis_conn)?;
    assert!(res.is_none());

    // When second logout
    let resp = cli
        .post("/api/auth/logout")
        .header("authorization", format!("Bearer {}", token))
        .send()
        .await;

    // Expect second logout
    resp.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[sqlx::test]
async fn test_login_invalid_credentials(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool, &config)?;
    let mut db = app_state.db.acquire().await?;
    let profile =
        insert_profile(&mut db, "couple@local.com", "password", ProfileRole::User).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When wrong password
    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({"email": "couple@local.com", "password": "wrong-password"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "Invalid credentials"}))
        .await;

    // When inactive profile
    sqlx::query("UPDATE public.profile SET is_active = FALSE WHERE id = $1")
        .bind(profile.id)
        .execute(&app_state.db)
        .await?;
    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({"email": "couple@local.com", "password": "password"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[sqlx::test]
async fn test_refresh_then_me(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool, &config)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let mut db = app_state.db.acquire().await?;
    let test_profile = generate_test_profile(
        &mut db,
        &mut *redis_conn,
        &config,
        "vendor@local.com",
        "password",
        ProfileRole::Vendor,
    )
    .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When refresh
    let resp = cli
        .post("/api/auth/refresh-token")
        .body_json(&json!({"refresh_token": test_profile.refresh_token}))
        .send()
        .await;

    // Expect refresh
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let token: String = json.value().object().get("token").deserialize();

    // When me with the new token
    let resp = cli
        .get("/api/auth/me")
        .header("authorization", format!("Bearer {}", token))
        .send()
        .await;

    // Expect me
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value()
        .object()
        .get("email")
        .assert_string("vendor@local.com");
    json.value().object().get("role").assert_string("vendor");

    // When refresh with an access token
    let resp = cli
        .post("/api/auth/refresh-token")
        .body_json(&json!({"refresh_token": token}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[sqlx::test]
async fn test_me_without_token(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool, &config)?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli.get("/api/auth/me").send().await;

    // Expect
    resp.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[sqlx::test]
async fn test_refresh_after_logout(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool, &config)?;
    let mut db = app_state.db.acquire().await?;
    insert_profile(&mut db, "couple@local.com", "password", ProfileRole::User).await?;
    let app = init_openapi_route(app_state, &config);
    let cli = TestClient::new(app);
    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({"email": "couple@local.com", "password": "password"}))
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let token: String = json.value().object().get("token").deserialize();
    let refresh_token: String = json.value().object().get("refresh_token").deserialize();

    // When logout
    let resp = cli
        .post("/api/auth/logout")
        .header("authorization", format!("Bearer {}", token))
        .send()
        .await;
    resp.assert_status(StatusCode::NO_CONTENT);

    // When refresh with the logged out refresh token
    let resp = cli
        .post("/api/auth/refresh-token")
        .body_json(&json!({"refresh_token": refresh_token}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[sqlx::test]
async fn test_refresh_token_single_use(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let app_state = init_test_state(pool, &config)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let mut db = app_state.db.acquire().await?;
    let test_profile = generate_test_profile(
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

    // When first refresh
    let resp = cli
        .post("/api/auth/refresh-token")
        .body_json(&json!({"refresh_token": test_profile.refresh_token}))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();

    // When old access token used
    let resp = cli
        .get("/api/auth/me")
        .header("authorization", format!("Bearer {}", test_profile.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::UNAUTHORIZED);

    // When same refresh token used again
    let resp = cli
        .post("/api/auth/refresh-token")
        .body_json(&json!({"refresh_token": test_profile.refresh_token}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}
