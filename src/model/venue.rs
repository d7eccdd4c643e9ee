use chrono::{DateTime, FixedOffset};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.venue";

pub const CATEGORIES: [&str; 9] = [
    "Palace Hotel",
    "Beach Resort",
    "Heritage Hotel",
    "Luxury Hotel",
    "Boutique Hotel",
    "Fort Hotel",
    "Lake Resort",
    "Hill Resort",
    "Destination Resort",
];

#[derive(Clone, Debug, FromRow)]
pub struct Venue {
    pub id: Uuid,
    pub vendor_id: Option<Uuid>,
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
    pub planning_timeline: Json<Vec<TimelineStep>>,
    pub signature_experiences: Json<Vec<TitledText>>,
    pub budget_breakdown: Json<Vec<BudgetShare>>,
    pub vendor_recommendations: Json<Vec<VendorTip>>,
    pub faqs: Json<Vec<Faq>>,
    pub policies: Json<Vec<TitledText>>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Venue {
    pub fn has_content(&self) -> bool {
        !self.unique_selling_points.is_empty()
    }
}

#[derive(Object, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub months: String,
    pub task: String,
}

/// Signature experiences and policies share this shape.
#[derive(Object, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TitledText {
    pub title: String,
    pub description: String,
}

#[derive(Object, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetShare {
    pub category: String,
    pub percentage: String,
    pub note: String,
}

#[derive(Object, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VendorTip {
    pub category: String,
    pub tip: String,
}

#[derive(Object, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}
