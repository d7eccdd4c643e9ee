use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};
use crate::{
    core::utils::datetime_to_string,
    impl_guard_error, impl_wedding_guard_error,
    model::guest::{Guest, GuestCategory, GuestSide, GuestStatus},
};

#[derive(Object, Deserialize)]
pub struct DetailGuest {
    pub id: String,
    pub wedding_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub side: Option<GuestSide>,
    pub category: Option<GuestCategory>,
    pub relationship: Option<String>,
    pub has_plus_one: bool,
    pub plus_one_name: Option<String>,
    pub dietary_notes: Option<String>,
    pub needs_accommodation: bool,
    pub needs_transportation: bool,
    pub table_number: Option<i32>,
    pub status: GuestStatus,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Guest> for DetailGuest {
    fn from(guest: Guest) -> Self {
        Self {
            id: guest.id.to_string(),
            wedding_id: guest.wedding_id.to_string(),
            first_name: guest.first_name,
            last_name: guest.last_name,
            email: guest.email,
            phone: guest.phone,
            side: guest.side.and_then(|x| x.parse().ok()),
            category: guest.category.and_then(|x| x.parse().ok()),
            relationship: guest.relationship,
            has_plus_one: guest.has_plus_one,
            plus_one_name: guest.plus_one_name,
            dietary_notes: guest.dietary_notes,
            needs_accommodation: guest.needs_accommodation,
            needs_transportation: guest.needs_transportation,
            table_number: guest.table_number,
            status: guest.status.parse().unwrap_or_default(),
            notes: guest.notes,
            created_at: datetime_to_string(guest.created_at),
            updated_at: datetime_to_string(guest.updated_at),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct GuestRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub side: Option<GuestSide>,
    pub category: Option<GuestCategory>,
    pub relationship: Option<String>,
    pub has_plus_one: Option<bool>,
    pub plus_one_name: Option<String>,
    pub dietary_notes: Option<String>,
    pub needs_accommodation: Option<bool>,
    pub needs_transportation: Option<bool>,
    pub table_number: Option<i32>,
    pub status: Option<GuestStatus>,
    pub notes: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct GuestStatusRequest {
    pub status: GuestStatus,
}

#[derive(ApiResponse)]
pub enum GetPaginateGuestResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailGuest>>),

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
pub enum GuestCreateResponses {
    #[oai(status = 201)]
    Created(Json<MessageResponse<DetailGuest>>),

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

/// Full edits and RSVP status changes.
#[derive(ApiResponse)]
pub enum GuestUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse<DetailGuest>>),

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
    GetPaginateGuestResponses,
    GuestCreateResponses,
    GuestUpdateResponses,
);

impl_wedding_guard_error!(
    GetPaginateGuestResponses,
    GuestCreateResponses,
    GuestUpdateResponses,
);
