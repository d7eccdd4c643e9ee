use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};
use crate::{
    core::utils::datetime_to_string,
    impl_guard_error,
    model::destination::{Destination, PhotoLocation},
};

#[derive(Object, Deserialize)]
pub struct DetailDestination {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub tagline: String,
    pub hero_title: String,
    pub description: String,
    pub hero_image_url: String,
    pub gallery_images: Vec<String>,
    pub best_season: String,
    pub best_months: Vec<String>,
    pub avg_budget_min: i64,
    pub avg_budget_max: i64,
    pub total_venues: i32,
    pub is_featured: bool,
    pub is_international: bool,
    pub sort_order: i32,
    pub planning_tips: Vec<String>,
    pub insider_secrets: Vec<String>,
    pub best_photo_locations: Vec<PhotoLocation>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Destination> for DetailDestination {
    fn from(destination: Destination) -> Self {
        Self {
            id: destination.id.to_string(),
            name: destination.name,
            slug: destination.slug,
            city: destination.city,
            state: destination.state,
            country: destination.country,
            tagline: destination.tagline,
            hero_title: destination.hero_title,
            description: destination.description,
            hero_image_url: destination.hero_image_url,
            gallery_images: destination.gallery_images,
            best_season: destination.best_season,
            best_months: destination.best_months,
            avg_budget_min: destination.avg_budget_min,
            avg_budget_max: destination.avg_budget_max,
            total_venues: destination.total_venues,
            is_featured: destination.is_featured,
            is_international: destination.is_international,
            sort_order: destination.sort_order,
            planning_tips: destination.planning_tips,
            insider_secrets: destination.insider_secrets,
            best_photo_locations: destination.best_photo_locations.0,
            created_at: datetime_to_string(destination.created_at),
            updated_at: datetime_to_string(destination.updated_at),
        }
    }
}

/// Create and update form. On update, absent optional fields keep their
/// stored value.
#[derive(Object, Deserialize)]
pub struct DestinationRequest {
    pub name: String,
    pub slug: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub tagline: Option<String>,
    pub hero_title: Option<String>,
    pub description: Option<String>,
    pub hero_image_url: Option<String>,
    pub gallery_images: Option<Vec<String>>,
    pub best_season: Option<String>,
    pub best_months: Option<Vec<String>>,
    pub avg_budget_min: Option<i64>,
    pub avg_budget_max: Option<i64>,
    pub total_venues: Option<i32>,
    pub is_featured: Option<bool>,
    pub is_international: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(ApiResponse)]
pub enum GetPublicDestinationResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailDestination>>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[allow(clippy::large_enum_variant)]
#[derive(ApiResponse)]
pub enum PublicDestinationDetailResponses {
    #[oai(status = 200)]
    Ok(Json<DetailDestination>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum GetPaginateDestinationResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailDestination>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum DestinationCreateResponses {
    #[oai(status = 201)]
    Created(Json<MessageResponse<DetailDestination>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

/// Update and toggle-featured.
#[derive(ApiResponse)]
pub enum DestinationUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse<DetailDestination>>),

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
pub enum DestinationDeleteResponses {
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
    GetPaginateDestinationResponses,
    DestinationCreateResponses,
    DestinationUpdateResponses,
    DestinationDeleteResponses,
);
