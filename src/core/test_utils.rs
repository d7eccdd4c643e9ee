use std::sync::Arc;

use chrono::Local;
use redis::ConnectionLike;
use sqlx::{pool::PoolConnection, PgPool, Postgres};
use uuid::Uuid;

use super::security::{generate_refresh_token_from_profile, generate_token_from_profile};
use crate::core::security::hash_password;
use crate::core::session::add_session;
use crate::model::profile::{Profile, ProfileRole, TABLE_NAME};
use crate::settings::Config;
use crate::AppState;

pub fn init_test_state(pool: PgPool, config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = redis::Client::open(config.redis_url.clone())?;
    let redis_pool = r2d2::Pool::builder().build(client)?;
    Ok(Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
        config: config.clone(),
    }))
}

pub async fn insert_profile(
    db: &mut PoolConnection<Postgres>,
    email: &str,
    password: &str,
    role: ProfileRole,
) -> anyhow::Result<Profile> {
    let now = Local::now().fixed_offset();
    let profile = Profile {
        id: Uuid::now_v7(),
        email: email.to_string(),
        password: hash_password(password)
            .map_err(|err| anyhow::anyhow!(err.to_string()))?,
        full_name: Some("Test Profile".to_string()),
        phone: None,
        avatar_url: None,
        role: role.as_str().to_string(),
        is_active: true,
        wedding_date: None,
        partner_name: None,
        city: None,
        last_sign_in_at: None,
        created_at: now,
        updated_at: now,
    };
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, email, password, full_name, role, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(profile.id)
    .bind(&profile.email)
    .bind(&profile.password)
    .bind(&profile.full_name)
    .bind(&profile.role)
    .bind(profile.is_active)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .execute(&mut **db)
    .await?;
    Ok(profile)
}

pub struct TestProfile {
    pub profile: Profile,
    pub token: String,
    pub refresh_token: String,
}

/// Insert a profile and open a session for it.
pub async fn generate_test_profile<C: ConnectionLike>(
    db: &mut PoolConnection<Postgres>,
    redis_conn: &mut C,
    config: &Config,
    email: &str,
    password: &str,
    role: ProfileRole,
) -> anyhow::Result<TestProfile> {
    let profile = insert_profile(db, email, password, role).await?;

    // Generate token
    let token = generate_token_from_profile(&profile, config)?;
    let refresh_token = generate_refresh_token_from_profile(&profile, config)?;
    add_session(
        redis_conn,
        &profile,
        config,
        token.clone(),
        refresh_token.clone(),
    )?;

    Ok(TestProfile {
        profile,
        token,
        refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use sqlx::{Acquire, PgPool};
    use uuid::Uuid;

    use crate::{
        core::{
            security::get_profile_from_token,
            session::get_session,
            test_utils::{generate_test_profile, init_test_state},
        },
        model::profile::ProfileRole,
        settings::get_config,
    };

    #[sqlx::test]
    async fn test_generate_test_profile(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let config = get_config()?;
        let app_state = init_test_state(pool, &config)?;
        let mut redis_conn = app_state.redis_conn.get()?;

        // When
        let mut db = app_state.db.acquire().await?;
        let res = generate_test_profile(
            &mut db,
            &mut *redis_conn,
            &config,
            "testuser@local.com",
            "testpassword",
            ProfileRole::Admin,
        )
        .await?;

        // Expect
        // is profile exists on db
        let profile: Option<(Uuid, String, String)> =
            sqlx::query_as("SELECT id, email, role FROM public.profile WHERE id = $1")
                .bind(res.profile.id)
                .fetch_optional(&mut *db)
                .await?;
        assert!(profile.is_some());
        assert_eq!(profile.unwrap().2, "admin".to_string());

        // is jwt token valid
        let mut tx = db.begin().await?;
        let token_profile =
            get_profile_from_token(&mut tx, &mut *redis_conn, Some(res.token.clone())).await?;
        assert!(token_profile.is_some());
        assert_eq!(token_profile.unwrap().email, "testuser@local.com".to_string());

        // is session exists on redis
        let session = get_session(&mut *redis_conn, res.token)?;
        assert!(session.is_some());
        Ok(())
    }
}
