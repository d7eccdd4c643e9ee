use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use poem_openapi::Enum;
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.guest";

#[derive(Clone, Debug, FromRow)]
pub struct Guest {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub side: Option<String>,
    pub category: Option<String>,
    pub relationship: Option<String>,
    pub has_plus_one: bool,
    pub plus_one_name: Option<String>,
    pub dietary_notes: Option<String>,
    pub needs_accommodation: bool,
    pub needs_transportation: bool,
    pub table_number: Option<i32>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// RSVP standing of a guest.
#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GuestStatus {
    #[default]
    Pending,
    Invited,
    Confirmed,
    Declined,
    Maybe,
    NoResponse,
}

impl GuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestStatus::Pending => "pending",
            GuestStatus::Invited => "invited",
            GuestStatus::Confirmed => "confirmed",
            GuestStatus::Declined => "declined",
            GuestStatus::Maybe => "maybe",
            GuestStatus::NoResponse => "no_response",
        }
    }
}

impl FromStr for GuestStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(GuestStatus::Pending),
            "invited" => Ok(GuestStatus::Invited),
            "confirmed" => Ok(GuestStatus::Confirmed),
            "declined" => Ok(GuestStatus::Declined),
            "maybe" => Ok(GuestStatus::Maybe),
            "no_response" => Ok(GuestStatus::NoResponse),
            other => Err(anyhow::anyhow!("unknown guest status {}", other)),
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GuestSide {
    Bride,
    Groom,
    Mutual,
    Planner,
}

impl GuestSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestSide::Bride => "bride",
            GuestSide::Groom => "groom",
            GuestSide::Mutual => "mutual",
            GuestSide::Planner => "planner",
        }
    }
}

impl FromStr for GuestSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bride" => Ok(GuestSide::Bride),
            "groom" => Ok(GuestSide::Groom),
            "mutual" => Ok(GuestSide::Mutual),
            "planner" => Ok(GuestSide::Planner),
            other => Err(anyhow::anyhow!("unknown guest side {}", other)),
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GuestCategory {
    Family,
    CloseFamily,
    Friends,
    Colleagues,
    Vip,
    Vendor,
    Other,
}

impl GuestCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestCategory::Family => "family",
            GuestCategory::CloseFamily => "close_family",
            GuestCategory::Friends => "friends",
            GuestCategory::Colleagues => "colleagues",
            GuestCategory::Vip => "vip",
            GuestCategory::Vendor => "vendor",
            GuestCategory::Other => "other",
        }
    }
}

impl FromStr for GuestCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "family" => Ok(GuestCategory::Family),
            "close_family" => Ok(GuestCategory::CloseFamily),
            "friends" => Ok(GuestCategory::Friends),
            "colleagues" => Ok(GuestCategory::Colleagues),
            "vip" => Ok(GuestCategory::Vip),
            "vendor" => Ok(GuestCategory::Vendor),
            "other" => Ok(GuestCategory::Other),
            other => Err(anyhow::anyhow!("unknown guest category {}", other)),
        }
    }
}
