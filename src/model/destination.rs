use chrono::{DateTime, FixedOffset};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.destination";

#[derive(Clone, Debug, FromRow)]
pub struct Destination {
    pub id: Uuid,
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
    pub best_photo_locations: Json<Vec<PhotoLocation>>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Object, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoLocation {
    pub spot: String,
    pub timing: String,
}
