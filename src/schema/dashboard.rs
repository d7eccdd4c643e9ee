use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::{
    common::{ForbiddenResponse, InternalServerErrorResponse, UnauthorizedResponse},
    inquiry::DetailInquiry,
};
use crate::impl_guard_error;

#[derive(Object, Deserialize)]
pub struct DashboardResponse {
    pub total_inquiries: i64,
    pub new_inquiries: i64,
    pub total_reviews: i64,
    pub pending_reviews: i64,
    pub total_venues: i64,
    pub total_destinations: i64,
    pub inquiries_this_week: i64,
    pub inquiries_last_week: i64,
    /// Percent change of this week's inquiries over last week's.
    pub weekly_change: i64,
    pub recent_inquiries: Vec<DetailInquiry>,
}

#[derive(ApiResponse)]
pub enum DashboardResponses {
    #[oai(status = 200)]
    Ok(Json<DashboardResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl_guard_error!(DashboardResponses);
