use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use poem_openapi::Enum;
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.inquiry";

#[derive(Clone, Debug, FromRow)]
pub struct Inquiry {
    pub id: Uuid,
    pub venue_id: Option<Uuid>,
    pub destination: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub wedding_date: Option<NaiveDate>,
    pub guest_count: Option<i32>,
    pub budget_range: Option<String>,
    pub message: String,
    pub source_page: Option<String>,
    pub status: String,
    pub priority: String,
    pub notes: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    Converted,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Converted => "converted",
            InquiryStatus::Closed => "closed",
        }
    }
}

impl FromStr for InquiryStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(InquiryStatus::New),
            "contacted" => Ok(InquiryStatus::Contacted),
            "converted" => Ok(InquiryStatus::Converted),
            "closed" => Ok(InquiryStatus::Closed),
            other => Err(anyhow::anyhow!("unknown inquiry status {}", other)),
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InquiryPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl InquiryPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryPriority::Low => "low",
            InquiryPriority::Normal => "normal",
            InquiryPriority::High => "high",
            InquiryPriority::Urgent => "urgent",
        }
    }
}

impl FromStr for InquiryPriority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(InquiryPriority::Low),
            "normal" => Ok(InquiryPriority::Normal),
            "high" => Ok(InquiryPriority::High),
            "urgent" => Ok(InquiryPriority::Urgent),
            other => Err(anyhow::anyhow!("unknown inquiry priority {}", other)),
        }
    }
}
