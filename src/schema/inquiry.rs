use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};
use crate::{
    core::utils::{date_to_string_opt, datetime_to_string},
    impl_guard_error,
    model::inquiry::{Inquiry, InquiryPriority, InquiryStatus},
};

#[derive(Object, Deserialize)]
pub struct DetailInquiry {
    pub id: String,
    pub venue_id: Option<String>,
    pub destination: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub wedding_date: Option<String>,
    pub guest_count: Option<i32>,
    pub budget_range: Option<String>,
    pub message: String,
    pub source_page: Option<String>,
    pub status: InquiryStatus,
    pub priority: InquiryPriority,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Inquiry> for DetailInquiry {
    fn from(inquiry: Inquiry) -> Self {
        Self {
            id: inquiry.id.to_string(),
            venue_id: inquiry.venue_id.map(|x| x.to_string()),
            destination: inquiry.destination,
            name: inquiry.name,
            email: inquiry.email,
            phone: inquiry.phone,
            wedding_date: date_to_string_opt(inquiry.wedding_date),
            guest_count: inquiry.guest_count,
            budget_range: inquiry.budget_range,
            message: inquiry.message,
            source_page: inquiry.source_page,
            status: inquiry.status.parse().unwrap_or_default(),
            priority: inquiry.priority.parse().unwrap_or_default(),
            notes: inquiry.notes,
            created_at: datetime_to_string(inquiry.created_at),
            updated_at: datetime_to_string(inquiry.updated_at),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct InquiryCreateRequest {
    pub venue_id: Option<String>,
    pub destination: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub wedding_date: Option<String>,
    pub guest_count: Option<i32>,
    pub budget_range: Option<String>,
    pub message: String,
    pub source_page: Option<String>,
}

#[derive(ApiResponse)]
pub enum InquiryCreateResponses {
    #[oai(status = 201)]
    Created(Json<MessageResponse<DetailInquiry>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct InquiryStatusRequest {
    pub status: InquiryStatus,
}

#[derive(Object, Deserialize)]
pub struct InquiryPriorityRequest {
    pub priority: InquiryPriority,
}

#[derive(Object, Deserialize)]
pub struct InquiryNotesRequest {
    pub notes: Option<String>,
}

#[derive(ApiResponse)]
pub enum GetPaginateInquiryResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailInquiry>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum InquiryDetailResponses {
    #[oai(status = 200)]
    Ok(Json<DetailInquiry>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

/// Status, notes and priority updates (admin and vendor).
#[derive(ApiResponse)]
pub enum InquiryUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse<DetailInquiry>>),

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
    GetPaginateInquiryResponses,
    InquiryDetailResponses,
    InquiryUpdateResponses,
);
