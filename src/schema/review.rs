use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};
use crate::{
    core::utils::{date_to_string_opt, datetime_to_string},
    impl_guard_error,
    model::review::{Review, ReviewStatus, ReviewType},
};

#[derive(Object, Deserialize)]
pub struct DetailReview {
    pub id: String,
    pub reviewer_name: String,
    pub reviewer_email: Option<String>,
    pub reviewer_city: Option<String>,
    pub venue_id: Option<String>,
    pub destination_id: Option<String>,
    pub review_type: ReviewType,
    pub rating: i32,
    pub title: Option<String>,
    pub content: String,
    pub wedding_date: Option<String>,
    pub guest_count: Option<i32>,
    pub status: ReviewStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Review> for DetailReview {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.to_string(),
            reviewer_name: review.reviewer_name,
            reviewer_email: review.reviewer_email,
            reviewer_city: review.reviewer_city,
            venue_id: review.venue_id.map(|x| x.to_string()),
            destination_id: review.destination_id.map(|x| x.to_string()),
            review_type: review.review_type.parse().unwrap_or_default(),
            rating: review.rating,
            title: review.title,
            content: review.content,
            wedding_date: date_to_string_opt(review.wedding_date),
            guest_count: review.guest_count,
            status: review.status.parse().unwrap_or_default(),
            created_at: datetime_to_string(review.created_at),
            updated_at: datetime_to_string(review.updated_at),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct ReviewCreateRequest {
    pub reviewer_name: String,
    pub reviewer_email: Option<String>,
    pub reviewer_city: Option<String>,
    pub venue_id: Option<String>,
    pub destination_id: Option<String>,
    pub review_type: Option<ReviewType>,
    pub rating: i32,
    pub title: Option<String>,
    pub content: String,
    /// `YYYY-MM-DD`
    pub wedding_date: Option<String>,
    pub guest_count: Option<i32>,
}

#[derive(ApiResponse)]
pub enum ReviewCreateResponses {
    #[oai(status = 201)]
    Created(Json<MessageResponse<DetailReview>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum GetPublicReviewResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<DetailReview>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum GetPaginateReviewResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailReview>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct ReviewStatusRequest {
    pub status: ReviewStatus,
}

#[derive(ApiResponse)]
pub enum ReviewUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse<DetailReview>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl_guard_error!(GetPaginateReviewResponses, ReviewUpdateResponses);
