use redis::ConnectionLike;
use serde::{Deserialize, Serialize};

use crate::{model::profile::Profile, settings::Config};

const REFRESH_KEY_PREFIX: &str = "refresh:";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    pub profile_id: String,
    pub refresh_token: String,
}

/// Stored under the refresh token, pointing back at the access session.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshSessionData {
    pub profile_id: String,
    pub token: String,
}

fn refresh_key(refresh_token: &str) -> String {
    format!("{}{}", REFRESH_KEY_PREFIX, refresh_token)
}

/// Store the session under the access token; it expires with the token.
/// The refresh token gets its own key living for `jwt_refresh_exp`.
pub fn add_session<C: ConnectionLike>(
    redis_conn: &mut C,
    profile: &Profile,
    config: &Config,
    token: String,
    refresh_token: String,
) -> anyhow::Result<()> {
    let refresh_data = RefreshSessionData {
        profile_id: profile.id.to_string(),
        token: token.clone(),
    };
    let refresh_json = serde_json::to_string(&refresh_data)?;
    let refresh_ttl_seconds = config.jwt_refresh_exp as u64 * 60;
    redis::Cmd::set_ex(refresh_key(&refresh_token), refresh_json, refresh_ttl_seconds)
        .exec(redis_conn)?;

    let session_data = SessionData {
        profile_id: profile.id.to_string(),
        refresh_token,
    };
    let session_json = serde_json::to_string(&session_data)?;
    let ttl_seconds = config.jwt_exp as u64 * 60;
    redis::Cmd::set_ex(token, session_json, ttl_seconds).exec(redis_conn)?;
    Ok(())
}

pub fn get_session<C: ConnectionLike>(
    redis_conn: &mut C,
    token: String,
) -> anyhow::Result<Option<SessionData>> {
    let res: Option<String> = redis::cmd("get").arg(token).query(redis_conn)?;
    match res {
        Some(val) => Ok(Some(serde_json::from_str(val.as_str())?)),
        None => Ok(None),
    }
}

pub fn get_refresh_session<C: ConnectionLike>(
    redis_conn: &mut C,
    refresh_token: &str,
) -> anyhow::Result<Option<RefreshSessionData>> {
    let res: Option<String> = redis::cmd("get")
        .arg(refresh_key(refresh_token))
        .query(redis_conn)?;
    match res {
        Some(val) => Ok(Some(serde_json::from_str(val.as_str())?)),
        None => Ok(None),
    }
}

/// Drop a refresh token together with the access session it was issued with.
/// Returns false when the refresh token was already gone.
pub fn remove_refresh_session<C: ConnectionLike>(
    redis_conn: &mut C,
    refresh_token: &str,
) -> anyhow::Result<bool> {
    let refresh_data = match get_refresh_session(redis_conn, refresh_token)? {
        Some(val) => val,
        None => return Ok(false),
    };
    redis::cmd("del")
        .arg(refresh_key(refresh_token))
        .exec(redis_conn)?;
    redis::cmd("del").arg(refresh_data.token).exec(redis_conn)?;
    Ok(true)
}

/// Returns false when there was no session to remove.
pub fn remove_session<C: ConnectionLike>(
    redis_conn: &mut C,
    token: String,
) -> anyhow::Result<bool> {
    let session_data = match get_session(redis_conn, token.clone())? {
        Some(val) => val,
        None => return Ok(false),
    };
    redis::cmd("del")
        .arg(refresh_key(&session_data.refresh_token))
        .exec(redis_conn)?;
    redis::cmd("del").arg(token).exec(redis_conn)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{
        core::{
            security::{generate_refresh_token_from_profile, generate_token_from_profile},
            session::{
                add_session, get_refresh_session, get_session, remove_refresh_session,
                remove_session,
            },
            test_utils::insert_profile,
        },
        model::profile::ProfileRole,
        settings::get_config,
    };

    #[sqlx::test]
    async fn test_remove_session_drops_refresh_token(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let config = get_config()?;
        let client = redis::Client::open(config.redis_url.clone())?;
        let redis_pool = r2d2::Pool::builder().build(client)?;
        let mut redis_conn = redis_pool.get()?;
        let mut db = pool.acquire().await?;
        let profile =
            insert_profile(&mut db, "couple@local.com", "password", ProfileRole::User).await?;
        let token = generate_token_from_profile(&profile, &config)?;
        let refresh_token = generate_refresh_token_from_profile(&profile, &config)?;
        add_session(
            &mut *redis_conn,
            &profile,
            &config,
            token.clone(),
            refresh_token.clone(),
        )?;
        let refresh = get_refresh_session(&mut *redis_conn, &refresh_token)?;
        assert_eq!(refresh.map(|x| x.token), Some(token.clone()));

        // When
        let removed = remove_session(&mut *redis_conn, token.clone())?;

        // Expect
        assert!(removed);
        assert!(get_session(&mut *redis_conn, token.clone())?.is_none());
        assert!(get_refresh_session(&mut *redis_conn, &refresh_token)?.is_none());
        assert!(!remove_session(&mut *redis_conn, token)?);
        Ok(())
    }

    #[sqlx::test]
    async fn test_remove_refresh_session_drops_access_token(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let config = get_config()?;
        let client = redis::Client::open(config.redis_url.clone())?;
        let redis_pool = r2d2::Pool::builder().build(client)?;
        let mut redis_conn = redis_pool.get()?;
        let mut db = pool.acquire().await?;
        let profile =
            insert_profile(&mut db, "vendor@local.com", "password", ProfileRole::Vendor).await?;
        let token = generate_token_from_profile(&profile, &config)?;
        let refresh_token = generate_refresh_token_from_profile(&profile, &config)?;
        add_session(
            &mut *redis_conn,
            &profile,
            &config,
            token.clone(),
            refresh_token.clone(),
        )?;

        // When
        let removed = remove_refresh_session(&mut *redis_conn, &refresh_token)?;

        // Expect
        assert!(removed);
        assert!(get_session(&mut *redis_conn, token)?.is_none());
        assert!(!remove_refresh_session(&mut *redis_conn, &refresh_token)?);
        Ok(())
    }
}
