use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::{
    common::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
        UnauthorizedResponse,
    },
    profile::DetailProfile,
};
use crate::impl_guard_error;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Object, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(ApiResponse)]
pub enum SignupResponses {
    #[oai(status = 201)]
    Created(Json<MessageResponse<DetailProfile>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued by login and refresh-token.
#[derive(Object, Deserialize)]
pub struct TokenResponse {
    pub exp: String,
    pub exp_in: i64,
    pub exp_refresh_token: String,
    pub refresh_token: String,
    pub token: String,
    pub token_type: String,
}

#[derive(ApiResponse)]
pub enum LoginResponses {
    #[oai(status = 200)]
    Ok(Json<TokenResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(ApiResponse)]
pub enum RefreshTokenResponses {
    #[oai(status = 200)]
    Ok(Json<TokenResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum LogoutResponses {
    #[oai(status = 204)]
    NoContent,

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum MeResponses {
    #[oai(status = 200)]
    Ok(Json<DetailProfile>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl_guard_error!(MeResponses);
