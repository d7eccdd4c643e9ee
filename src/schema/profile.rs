use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};
use crate::{
    core::utils::{date_to_string_opt, datetime_to_string, datetime_to_string_opt},
    impl_guard_error,
    model::profile::{Profile, ProfileRole},
};

#[derive(Object, Deserialize)]
pub struct DetailProfile {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: ProfileRole,
    pub is_active: bool,
    pub wedding_date: Option<String>,
    pub partner_name: Option<String>,
    pub city: Option<String>,
    pub last_sign_in_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Profile> for DetailProfile {
    fn from(profile: Profile) -> Self {
        let role = profile.role();
        Self {
            id: profile.id.to_string(),
            email: profile.email,
            full_name: profile.full_name,
            phone: profile.phone,
            avatar_url: profile.avatar_url,
            role,
            is_active: profile.is_active,
            wedding_date: date_to_string_opt(profile.wedding_date),
            partner_name: profile.partner_name,
            city: profile.city,
            last_sign_in_at: datetime_to_string_opt(profile.last_sign_in_at),
            created_at: datetime_to_string(profile.created_at),
            updated_at: datetime_to_string(profile.updated_at),
        }
    }
}

#[derive(ApiResponse)]
pub enum GetPaginateProfileResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailProfile>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct ProfileStatsResponse {
    pub total: i64,
    pub active: i64,
    pub vendors: i64,
    pub admins: i64,
}

#[derive(ApiResponse)]
pub enum ProfileStatsResponses {
    #[oai(status = 200)]
    Ok(Json<ProfileStatsResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ProfileDetailResponses {
    #[oai(status = 200)]
    Ok(Json<DetailProfile>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: ProfileRole,
    pub is_active: bool,
    pub city: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: ProfileRole,
}

/// Shared by update, toggle-active and change-role.
#[derive(ApiResponse)]
pub enum ProfileUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse<DetailProfile>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ProfileDeleteResponses {
    #[oai(status = 204)]
    NoContent,

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl_guard_error!(
    GetPaginateProfileResponses,
    ProfileStatsResponses,
    ProfileDetailResponses,
    ProfileUpdateResponses,
    ProfileDeleteResponses,
);
