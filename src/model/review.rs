use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use poem_openapi::Enum;
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.review";

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Clone, Debug, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub reviewer_name: String,
    pub reviewer_email: Option<String>,
    pub reviewer_city: Option<String>,
    pub venue_id: Option<Uuid>,
    pub destination_id: Option<Uuid>,
    pub review_type: String,
    pub rating: i32,
    pub title: Option<String>,
    pub content: String,
    pub wedding_date: Option<NaiveDate>,
    pub guest_count: Option<i32>,
    pub status: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "approved" => Ok(ReviewStatus::Approved),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(anyhow::anyhow!("unknown review status {}", other)),
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    #[default]
    Planner,
    Venue,
    Destination,
}

impl ReviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewType::Planner => "planner",
            ReviewType::Venue => "venue",
            ReviewType::Destination => "destination",
        }
    }
}

impl FromStr for ReviewType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planner" => Ok(ReviewType::Planner),
            "venue" => Ok(ReviewType::Venue),
            "destination" => Ok(ReviewType::Destination),
            other => Err(anyhow::anyhow!("unknown review type {}", other)),
        }
    }
}
