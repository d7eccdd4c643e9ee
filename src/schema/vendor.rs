use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{ForbiddenResponse, InternalServerErrorResponse, UnauthorizedResponse};
use crate::impl_guard_error;

#[derive(Object, Deserialize)]
pub struct VendorStatsResponse {
    pub total_venues: i64,
    pub active_venues: i64,
    pub total_inquiries: i64,
    pub new_inquiries: i64,
    pub total_reviews: i64,
    pub avg_rating: f64,
    pub total_shortlisted: i64,
}

#[derive(ApiResponse)]
pub enum VendorStatsResponses {
    #[oai(status = 200)]
    Ok(Json<VendorStatsResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl_guard_error!(VendorStatsResponses);
