use std::sync::Arc;

use chrono::{Duration, Local};
use poem::web::Data;
use poem_openapi::{payload::Json, OpenApi, Tags};
use redis::ConnectionLike;
use uuid::Uuid;

use crate::{
    core::{
        security::{
            authorize, generate_refresh_token_from_profile, generate_token_from_profile,
            get_profile_from_refresh_token, get_profile_from_token, hash_password,
            verify_hash_password, BearerAuthorization,
        },
        session::{add_session, remove_refresh_session, remove_session},
        utils::{datetime_to_string, non_blank},
    },
    model::profile::{Profile, ProfileRole},
    repository::profile::{create_profile, get_profile_by_email, touch_last_sign_in},
    schema::{
        auth::{
            LoginRequest, LoginResponses, LogoutResponses, MeResponses, RefreshTokenRequest,
            RefreshTokenResponses, SignupRequest, SignupResponses, TokenResponse,
            MIN_PASSWORD_LENGTH,
        },
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse,
            UnauthorizedResponse,
        },
    },
    settings::Config,
    AppState,
};

#[derive(Tags)]
enum ApiAuthTags {
    Auth,
}

pub struct ApiAuth;

/// Sign both tokens and open the session they belong to.
fn issue_tokens<C: ConnectionLike>(
    redis_conn: &mut C,
    profile: &Profile,
    config: &Config,
) -> anyhow::Result<TokenResponse> {
    let token = generate_token_from_profile(profile, config)?;
    let refresh_token = generate_refresh_token_from_profile(profile, config)?;
    add_session(
        redis_conn,
        profile,
        config,
        token.clone(),
        refresh_token.clone(),
    )?;
    let now = Local::now().fixed_offset();
    let exp = now + Duration::minutes(config.jwt_exp as i64);
    let exp_refresh_token = now + Duration::minutes(config.jwt_refresh_exp as i64);
    Ok(TokenResponse {
        exp: datetime_to_string(exp),
        exp_in: config.jwt_exp as i64 * 60,
        exp_refresh_token: datetime_to_string(exp_refresh_token),
        refresh_token,
        token,
        token_type: "Bearer".to_string(),
    })
}

#[OpenApi]
impl ApiAuth {
    #[oai(path = "/auth/signup", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_signup(
        &self,
        json: Json<SignupRequest>,
        state: Data<&Arc<AppState>>,
    ) -> SignupResponses {
        let email = json.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return SignupResponses::BadRequest(Json(BadRequestResponse::new(
                "A valid email is required",
            )));
        }
        if json.password.chars().count() < MIN_PASSWORD_LENGTH {
            return SignupResponses::BadRequest(Json(BadRequestResponse::new(&format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ))));
        }

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return SignupResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_signup",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // email must be unique
        match get_profile_by_email(&mut tx, &email).await {
            Ok(Some(_)) => {
                return SignupResponses::BadRequest(Json(BadRequestResponse::new(
                    "Email already registered",
                )))
            }
            Ok(None) => {}
            Err(err) => {
                return SignupResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_signup",
                        "check email on database",
                        &err.to_string(),
                    ),
                ))
            }
        }

        let password = match hash_password(&json.password) {
            Ok(val) => val,
            Err(err) => {
                return SignupResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_signup",
                        "hash password",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let now = Local::now().fixed_offset();
        let profile = Profile {
            id: Uuid::now_v7(),
            email,
            password,
            full_name: non_blank(json.full_name.clone()),
            phone: non_blank(json.phone.clone()),
            avatar_url: None,
            role: ProfileRole::User.as_str().to_string(),
            is_active: true,
            wedding_date: None,
            partner_name: None,
            city: None,
            last_sign_in_at: None,
            created_at: now,
            updated_at: now,
        };
        if let Err(err) = create_profile(&mut tx, &profile).await {
            return SignupResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.auth",
                "auth_signup",
                "create profile",
                &err.to_string(),
            )));
        }

        if let Err(err) = tx.commit().await {
            return SignupResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.auth",
                "auth_signup",
                "commit transaction",
                &err.to_string(),
            )));
        }
        tracing::info!("profile {} signed up", profile.id);
        SignupResponses::Created(Json(MessageResponse {
            message: "Account created successfully".to_string(),
            data: profile.into(),
        }))
    }

    #[oai(path = "/auth/login", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_login(
        &self,
        json: Json<LoginRequest>,
        state: Data<&Arc<AppState>>,
    ) -> LoginResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_login",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_login",
                    "get redis pool connection",
                    &err.to_string(),
                )))
            }
        };

        // get profile on db
        let mut profile = match get_profile_by_email(&mut tx, &json.email).await {
            Ok(Some(val)) if val.is_active => val,
            Ok(_) => {
                return LoginResponses::BadRequest(Json(BadRequestResponse::new(
                    "Invalid credentials",
                )));
            }
            Err(err) => {
                return LoginResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_login",
                        "check profile on database",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // validate password
        let is_valid = match verify_hash_password(&json.password, &profile.password) {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_login",
                    "validate profile password",
                    &err.to_string(),
                )))
            }
        };
        if !is_valid {
            return LoginResponses::BadRequest(Json(BadRequestResponse::new(
                "Invalid credentials",
            )));
        }

        let token = match issue_tokens(&mut *redis_conn, &profile, &state.config) {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_login",
                    "issue tokens",
                    &err.to_string(),
                )))
            }
        };

        let now = Local::now().fixed_offset();
        if let Err(err) = touch_last_sign_in(&mut tx, &mut profile, &now).await {
            return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.auth",
                "auth_login",
                "record last sign in",
                &err.to_string(),
            )));
        }
        if let Err(err) = tx.commit().await {
            return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.auth",
                "auth_login",
                "commit transaction",
                &err.to_string(),
            )));
        }
        LoginResponses::Ok(Json(token))
    }

    #[oai(
        path = "/auth/refresh-token",
        method = "post",
        tag = "ApiAuthTags::Auth"
    )]
    async fn auth_refresh_token(
        &self,
        json: Json<RefreshTokenRequest>,
        state: Data<&Arc<AppState>>,
    ) -> RefreshTokenResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return RefreshTokenResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_refresh_token",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return RefreshTokenResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_refresh_token",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let profile = match get_profile_from_refresh_token(
            &mut tx,
            &mut *redis_conn,
            Some(json.refresh_token.clone()),
            &state.config,
        )
        .await
        {
            Ok(Some(val)) => val,
            Ok(None) => {
                return RefreshTokenResponses::Unauthorized(Json(UnauthorizedResponse::default()))
            }
            Err(err) => {
                return RefreshTokenResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_refresh_token",
                        "get profile from refresh token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Refresh tokens are single use
        match remove_refresh_session(&mut *redis_conn, &json.refresh_token) {
            Ok(true) => {}
            Ok(false) => {
                return RefreshTokenResponses::Unauthorized(Json(UnauthorizedResponse::default()))
            }
            Err(err) => {
                return RefreshTokenResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_refresh_token",
                        "revoke refresh token",
                        &err.to_string(),
                    ),
                ))
            }
        }

        match issue_tokens(&mut *redis_conn, &profile, &state.config) {
            Ok(val) => RefreshTokenResponses::Ok(Json(val)),
            Err(err) => RefreshTokenResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_refresh_token",
                    "issue tokens",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/auth/logout", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_logout(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> LogoutResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return LogoutResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_logout",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return LogoutResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_logout",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate token
        let jwt_token = match auth.0.token {
            Some(val) => val,
            None => return LogoutResponses::Unauthorized(Json(UnauthorizedResponse::default())),
        };
        match get_profile_from_token(&mut tx, &mut *redis_conn, Some(jwt_token.clone())).await {
            Ok(Some(_)) => {}
            Ok(None) => return LogoutResponses::Unauthorized(Json(UnauthorizedResponse::default())),
            Err(err) => {
                return LogoutResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_logout",
                        "get profile from token",
                        &err.to_string(),
                    ),
                ))
            }
        }
        match remove_session(&mut *redis_conn, jwt_token) {
            Ok(true) => LogoutResponses::NoContent,
            Ok(false) => LogoutResponses::Unauthorized(Json(UnauthorizedResponse::default())),
            Err(err) => LogoutResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_logout",
                    "remove session",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/auth/me", method = "get", tag = "ApiAuthTags::Auth")]
    async fn auth_me(&self, state: Data<&Arc<AppState>>, auth: BearerAuthorization) -> MeResponses {
        match authorize(&state, &auth, &[], "route.auth", "auth_me").await {
            Ok((_, profile)) => MeResponses::Ok(Json(profile.into())),
            Err(err) => err.into(),
        }
    }
}
