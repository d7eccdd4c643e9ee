use poem_openapi::{payload::Json, ApiResponse, Enum, Object};
use serde::Deserialize;

use super::{
    common::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
        PaginateResponse, UnauthorizedResponse,
    },
    venue::DetailVenue,
};
use crate::impl_guard_error;

#[derive(Object, Deserialize)]
pub struct ShortlistToggleRequest {
    pub venue_id: String,
    pub notes: Option<String>,
    pub event_type: Option<String>,
}

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShortlistAction {
    Added,
    Removed,
}

#[derive(Object, Deserialize)]
pub struct ShortlistToggleResponse {
    pub action: ShortlistAction,
    pub venue_id: String,
}

#[derive(ApiResponse)]
pub enum ShortlistToggleResponses {
    #[oai(status = 200)]
    Ok(Json<ShortlistToggleResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ShortlistDeleteResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse<ShortlistToggleResponse>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct DetailShortlist {
    pub id: String,
    pub notes: Option<String>,
    pub event_type: Option<String>,
    pub created_at: String,
    pub venue: Option<DetailVenue>,
}

#[derive(ApiResponse)]
pub enum GetPaginateShortlistResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailShortlist>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl_guard_error!(
    ShortlistToggleResponses,
    ShortlistDeleteResponses,
    GetPaginateShortlistResponses
);
