use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};
use crate::{
    core::utils::datetime_to_string,
    impl_guard_error,
    model::venue::{BudgetShare, Faq, TimelineStep, TitledText, Venue, VendorTip},
};

#[derive(Object, Deserialize)]
pub struct DetailVenue {
    pub id: String,
    pub vendor_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub starting_price: String,
    pub price_per_plate_veg: Option<i64>,
    pub guest_capacity_min: i32,
    pub guest_capacity_max: i32,
    pub accommodation_rooms: Option<i32>,
    pub star_rating: i32,
    pub google_rating: f64,
    pub total_reviews: i32,
    pub hero_image_url: String,
    pub cuisine_types: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub unique_selling_points: Vec<String>,
    pub insider_tips: Vec<String>,
    pub what_to_expect: Vec<String>,
    pub photography_spots: Vec<String>,
    pub planning_timeline: Vec<TimelineStep>,
    pub signature_experiences: Vec<TitledText>,
    pub budget_breakdown: Vec<BudgetShare>,
    pub vendor_recommendations: Vec<VendorTip>,
    pub faqs: Vec<Faq>,
    pub policies: Vec<TitledText>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Venue> for DetailVenue {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id.to_string(),
            vendor_id: venue.vendor_id.map(|x| x.to_string()),
            name: venue.name,
            slug: venue.slug,
            category: venue.category,
            city: venue.city,
            state: venue.state,
            country: venue.country,
            starting_price: venue.starting_price,
            price_per_plate_veg: venue.price_per_plate_veg,
            guest_capacity_min: venue.guest_capacity_min,
            guest_capacity_max: venue.guest_capacity_max,
            accommodation_rooms: venue.accommodation_rooms,
            star_rating: venue.star_rating,
            google_rating: venue.google_rating,
            total_reviews: venue.total_reviews,
            hero_image_url: venue.hero_image_url,
            cuisine_types: venue.cuisine_types,
            is_featured: venue.is_featured,
            is_active: venue.is_active,
            unique_selling_points: venue.unique_selling_points,
            insider_tips: venue.insider_tips,
            what_to_expect: venue.what_to_expect,
            photography_spots: venue.photography_spots,
            planning_timeline: venue.planning_timeline.0,
            signature_experiences: venue.signature_experiences.0,
            budget_breakdown: venue.budget_breakdown.0,
            vendor_recommendations: venue.vendor_recommendations.0,
            faqs: venue.faqs.0,
            policies: venue.policies.0,
            created_at: datetime_to_string(venue.created_at),
            updated_at: datetime_to_string(venue.updated_at),
        }
    }
}

/// Create and update form. On update, absent optional fields keep their
/// stored value.
#[derive(Object, Deserialize)]
pub struct VenueRequest {
    pub name: String,
    pub slug: Option<String>,
    pub vendor_id: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub starting_price: Option<String>,
    pub price_per_plate_veg: Option<i64>,
    pub guest_capacity_min: Option<i32>,
    pub guest_capacity_max: Option<i32>,
    pub accommodation_rooms: Option<i32>,
    pub star_rating: Option<i32>,
    pub google_rating: Option<f64>,
    pub total_reviews: Option<i32>,
    pub hero_image_url: Option<String>,
    pub cuisine_types: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(ApiResponse)]
pub enum GetPublicVenueResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailVenue>>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[allow(clippy::large_enum_variant)]
#[derive(ApiResponse)]
pub enum PublicVenueDetailResponses {
    #[oai(status = 200)]
    Ok(Json<DetailVenue>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum VenueCategoriesResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<String>>),
}

#[derive(ApiResponse)]
pub enum GetPaginateVenueResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailVenue>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum VenueCreateResponses {
    #[oai(status = 201)]
    Created(Json<MessageResponse<DetailVenue>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

/// Update, toggle-featured and toggle-active (admin and vendor).
#[derive(ApiResponse)]
pub enum VenueUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse<DetailVenue>>),

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
pub enum VenueDeleteResponses {
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
    GetPaginateVenueResponses,
    VenueCreateResponses,
    VenueUpdateResponses,
    VenueDeleteResponses,
);
