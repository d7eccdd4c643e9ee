use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};
use crate::{
    core::utils::{date_to_string_opt, datetime_to_string},
    impl_guard_error, impl_wedding_guard_error,
    model::wedding::{DestinationType, InvitationStatus, MemberRole, PlanningStatus, Wedding},
    repository::wedding::{WeddingMemberDetail, WeddingStats},
};

#[derive(Object, Deserialize)]
pub struct DetailWedding {
    pub id: String,
    pub bride_name: String,
    pub groom_name: String,
    pub wedding_date: Option<String>,
    pub primary_city: Option<String>,
    pub destination_type: DestinationType,
    pub estimated_guests: Option<i32>,
    pub total_budget: Option<i64>,
    pub currency: String,
    pub planning_status: PlanningStatus,
    pub website_slug: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Wedding> for DetailWedding {
    fn from(wedding: Wedding) -> Self {
        Self {
            id: wedding.id.to_string(),
            bride_name: wedding.bride_name,
            groom_name: wedding.groom_name,
            wedding_date: date_to_string_opt(wedding.wedding_date),
            primary_city: wedding.primary_city,
            destination_type: wedding.destination_type.parse().unwrap_or_default(),
            estimated_guests: wedding.estimated_guests,
            total_budget: wedding.total_budget,
            currency: wedding.currency,
            planning_status: wedding.planning_status.parse().unwrap_or_default(),
            website_slug: wedding.website_slug,
            notes: wedding.notes,
            created_at: datetime_to_string(wedding.created_at),
            updated_at: datetime_to_string(wedding.updated_at),
        }
    }
}

/// Create and update payload. Absent optional fields keep their stored value on update.
#[derive(Object, Deserialize)]
pub struct WeddingRequest {
    pub bride_name: String,
    pub groom_name: String,
    /// `YYYY-MM-DD`
    pub wedding_date: Option<String>,
    pub primary_city: Option<String>,
    pub destination_type: Option<DestinationType>,
    pub estimated_guests: Option<i32>,
    pub total_budget: Option<i64>,
    pub currency: Option<String>,
    pub planning_status: Option<PlanningStatus>,
    pub notes: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct WeddingStatsResponse {
    pub total_guests: i64,
    pub confirmed_guests: i64,
    pub pending_rsvps: i64,
    pub total_budget: i64,
    pub spent_budget: i64,
    pub pending_tasks: i64,
    pub completed_tasks: i64,
    /// Negative once the date has passed, null without a date.
    pub days_until_wedding: Option<i64>,
}

impl WeddingStatsResponse {
    pub fn new(stats: WeddingStats, days_until_wedding: Option<i64>) -> Self {
        Self {
            total_guests: stats.total_guests,
            confirmed_guests: stats.confirmed_guests,
            pending_rsvps: stats.pending_rsvps,
            total_budget: stats.total_budget,
            spent_budget: stats.spent_budget,
            pending_tasks: stats.pending_tasks,
            completed_tasks: stats.completed_tasks,
            days_until_wedding,
        }
    }
}

#[derive(Object, Deserialize)]
pub struct DetailWeddingMember {
    pub id: String,
    pub profile_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: MemberRole,
    pub invitation_status: InvitationStatus,
    pub created_at: String,
}

impl From<WeddingMemberDetail> for DetailWeddingMember {
    fn from(member: WeddingMemberDetail) -> Self {
        Self {
            id: member.id.to_string(),
            profile_id: member.profile_id.to_string(),
            email: member.email,
            full_name: member.full_name,
            role: member.role.parse().unwrap_or_default(),
            invitation_status: member.invitation_status.parse().unwrap_or_default(),
            created_at: datetime_to_string(member.created_at),
        }
    }
}

/// Adds an existing profile, looked up by email.
#[derive(Object, Deserialize)]
pub struct WeddingMemberCreateRequest {
    pub email: String,
    pub role: MemberRole,
}

#[derive(ApiResponse)]
pub enum GetPaginateWeddingResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailWedding>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum WeddingCreateResponses {
    #[oai(status = 201)]
    Created(Json<MessageResponse<DetailWedding>>),

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
pub enum WeddingDetailResponses {
    #[oai(status = 200)]
    Ok(Json<DetailWedding>),

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
pub enum WeddingUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse<DetailWedding>>),

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

/// Shared by every planning delete endpoint.
#[derive(ApiResponse)]
pub enum WeddingDeleteResponses {
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

#[derive(ApiResponse)]
pub enum WeddingStatsResponses {
    #[oai(status = 200)]
    Ok(Json<WeddingStatsResponse>),

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
pub enum WeddingMemberListResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<DetailWeddingMember>>),

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
pub enum WeddingMemberCreateResponses {
    #[oai(status = 201)]
    Created(Json<MessageResponse<DetailWeddingMember>>),

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
    GetPaginateWeddingResponses,
    WeddingCreateResponses,
    WeddingDetailResponses,
    WeddingUpdateResponses,
    WeddingDeleteResponses,
    WeddingStatsResponses,
    WeddingMemberListResponses,
    WeddingMemberCreateResponses,
);

impl_wedding_guard_error!(
    WeddingDetailResponses,
    WeddingUpdateResponses,
    WeddingDeleteResponses,
    WeddingStatsResponses,
    WeddingMemberListResponses,
    WeddingMemberCreateResponses,
);
