use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Local};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use poem::Request;
use poem_openapi::{auth::Bearer, SecurityScheme};
use redis::ConnectionLike;
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    model::profile::{Profile, ProfileRole},
    repository::profile::get_profile_by_id,
    schema::common::InternalServerErrorResponse,
    settings::Config,
    AppState,
};

use super::session::{get_refresh_session, get_session};

/// password hashing
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    // Argon2 with default params (Argon2id v19)
    let argon2 = Argon2::default();

    // Hash password to PHC string ($argon2id$v=19$...)
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

/// password hash verification
pub fn verify_hash_password(
    password: &str,
    password_hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(password_hash)?;
    let verify = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(verify)
}

#[cfg(test)]
mod test_hash_password {
    use super::*;

    #[test]
    fn test_hashing_password() {
        let password = "secretpassword";
        let hash = hash_password(password);
        assert!(hash.is_ok());
        let hash = hash.unwrap();
        let verify = verify_hash_password(password, &hash);
        assert!(verify.is_ok());
        assert!(verify.unwrap());
        let verify_false = verify_hash_password("wrongpassword", &hash);
        assert!(verify_false.is_ok());
        assert!(!verify_false.unwrap());
    }
}

pub struct Keys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn new(profile: &Profile, config: &Config) -> Self {
        let exp = (Local::now() + Duration::minutes(config.jwt_exp as i64)).timestamp();

        Self {
            id: profile.id.to_string(),
            email: profile.email.clone(),
            role: profile.role.clone(),
            exp,
            jti: Uuid::now_v7().to_string(),
        }
    }
}

/// Generate token
pub fn encode_token(claims: &Claims, jwt_secret: &str) -> anyhow::Result<String> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &keys.encoding)?;
    Ok(token)
}

/// Extract payload and Validate token
pub fn decode_token(token: &str, jwt_secret: &str) -> anyhow::Result<Claims> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &keys.decoding, &Validation::default())?;
    Ok(token_data.claims)
}

pub fn generate_token_from_profile(profile: &Profile, config: &Config) -> anyhow::Result<String> {
    let claims = Claims::new(profile, config);
    encode_token(&claims, &config.jwt_secret)
}

/// Resolve the bearer token to an active profile through its session.
pub async fn get_profile_from_token<C: ConnectionLike>(
    tx: &mut Transaction<'_, Postgres>,
    redis_conn: &mut C,
    jwt_token: Option<String>,
) -> anyhow::Result<Option<Profile>> {
    let jwt_token = match jwt_token {
        Some(val) => val,
        None => return Ok(None),
    };
    let session = match get_session(redis_conn, jwt_token)? {
        Some(val) => val,
        None => return Ok(None),
    };
    let profile_id = Uuid::parse_str(&session.profile_id)?;
    let profile = get_profile_by_id(tx, &profile_id).await?;
    Ok(profile.filter(|x| x.is_active))
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClaimsRefresh {
    pub id: String,
    pub email: String,
    pub exp: i64,
    pub type_key: String,
    pub jti: String,
}

impl ClaimsRefresh {
    pub fn new(profile: &Profile, config: &Config) -> Self {
        let exp = (Local::now() + Duration::minutes(config.jwt_refresh_exp as i64)).timestamp();

        Self {
            id: profile.id.to_string(),
            email: profile.email.clone(),
            exp,
            type_key: "refresh".to_string(),
            jti: Uuid::now_v7().to_string(),
        }
    }
}

/// Generate refresh token
pub fn encode_refresh_token(claims: &ClaimsRefresh, jwt_secret: &str) -> anyhow::Result<String> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &keys.encoding)?;
    Ok(token)
}

/// Extract payload and Validate referesh token
pub fn decode_refresh_token(token: &str, jwt_secret: &str) -> anyhow::Result<ClaimsRefresh> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token_data = decode::<ClaimsRefresh>(token, &keys.decoding, &Validation::default())?;
    if token_data.claims.type_key != "refresh" {
        anyhow::bail!("not a refresh token");
    }
    Ok(token_data.claims)
}

pub fn generate_refresh_token_from_profile(
    profile: &Profile,
    config: &Config,
) -> anyhow::Result<String> {
    let claims = ClaimsRefresh::new(profile, config);
    encode_refresh_token(&claims, &config.jwt_secret)
}

/// `None` for an invalid, expired or revoked refresh token, or an inactive profile.
pub async fn get_profile_from_refresh_token<C: ConnectionLike>(
    tx: &mut Transaction<'_, Postgres>,
    redis_conn: &mut C,
    refresh_token: Option<String>,
    config: &Config,
) -> anyhow::Result<Option<Profile>> {
    let refresh_token = match refresh_token {
        Some(val) => val,
        None => return Ok(None),
    };
    let claims = match decode_refresh_token(refresh_token.as_str(), &config.jwt_secret) {
        Ok(val) => val,
        Err(_) => return Ok(None),
    };
    let refresh_session = match get_refresh_session(redis_conn, &refresh_token)? {
        Some(val) if val.profile_id == claims.id => val,
        _ => return Ok(None),
    };
    let profile_id = Uuid::parse_str(&refresh_session.profile_id)?;
    let profile = get_profile_by_id(tx, &profile_id).await?;
    Ok(profile.filter(|x| x.is_active))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserApiKey {
    pub token: Option<String>,
}

/// ApiKey authorization
#[derive(SecurityScheme)]
#[oai(ty = "bearer", checker = "bearer_checker")]
pub struct BearerAuthorization(pub UserApiKey);

pub async fn bearer_checker(_req: &Request, api_key: Bearer) -> Option<UserApiKey> {
    Some(UserApiKey {
        token: Some(api_key.token),
    })
}

/// Why a request was turned away before reaching its handler body.
pub enum GuardError {
    Unauthorized,
    Forbidden,
    InternalServerError(InternalServerErrorResponse),
}

/// Open a transaction, resolve the caller and check their role.
/// An empty `roles` slice admits any active profile.
pub async fn authorize(
    state: &AppState,
    auth: &BearerAuthorization,
    roles: &[ProfileRole],
    module: &str,
    function: &str,
) -> Result<(Transaction<'static, Postgres>, Profile), GuardError> {
    let mut tx = state.db.begin().await.map_err(|err| {
        GuardError::InternalServerError(InternalServerErrorResponse::new(
            module,
            function,
            "begin transaction",
            &err.to_string(),
        ))
    })?;
    let mut redis_conn = state.redis_conn.get().map_err(|err| {
        GuardError::InternalServerError(InternalServerErrorResponse::new(
            module,
            function,
            "get redis pool connection",
            &err.to_string(),
        ))
    })?;
    let profile = get_profile_from_token(&mut tx, &mut *redis_conn, auth.0.token.clone())
        .await
        .map_err(|err| {
            GuardError::InternalServerError(InternalServerErrorResponse::new(
                module,
                function,
                "get profile from token",
                &err.to_string(),
            ))
        })?
        .ok_or(GuardError::Unauthorized)?;
    if !roles.is_empty() && !roles.contains(&profile.role()) {
        tracing::warn!(
            "{}.{}: profile {} with role {} denied",
            module,
            function,
            profile.id,
            profile.role
        );
        return Err(GuardError::Forbidden);
    }
    Ok((tx, profile))
}
