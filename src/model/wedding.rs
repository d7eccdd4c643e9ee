use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use poem_openapi::Enum;
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::utils::slugify;

pub const TABLE_NAME: &str = "public.wedding";
pub const MEMBER_TABLE_NAME: &str = "public.wedding_member";

/// Couple names plus the tail of the wedding id, e.g. `asha-rohan-1a2b3c4d`.
pub fn website_slug(bride_name: &str, groom_name: &str, id: &Uuid) -> String {
    let suffix = id.simple().to_string();
    format!(
        "{}-{}",
        slugify(&format!("{} {}", bride_name, groom_name)),
        &suffix[suffix.len() - 8..]
    )
}

#[derive(Clone, Debug, FromRow)]
pub struct Wedding {
    pub id: Uuid,
    pub bride_name: String,
    pub groom_name: String,
    pub wedding_date: Option<NaiveDate>,
    pub primary_city: Option<String>,
    pub destination_type: String,
    pub estimated_guests: Option<i32>,
    pub total_budget: Option<i64>,
    pub currency: String,
    pub planning_status: String,
    pub website_slug: String,
    pub created_by: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Clone, Debug, FromRow)]
pub struct WeddingMember {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub profile_id: Uuid,
    pub role: String,
    pub invitation_status: String,
    pub invited_by: Option<Uuid>,
    pub created_at: DateTime<FixedOffset>,
}

impl WeddingMember {
    pub fn role(&self) -> MemberRole {
        self.role.parse().unwrap_or_default()
    }
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    Local,
    #[default]
    Destination,
    International,
}

impl DestinationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::Local => "local",
            DestinationType::Destination => "destination",
            DestinationType::International => "international",
        }
    }
}

impl FromStr for DestinationType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(DestinationType::Local),
            "destination" => Ok(DestinationType::Destination),
            "international" => Ok(DestinationType::International),
            other => Err(anyhow::anyhow!("unknown destination type {}", other)),
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanningStatus {
    #[default]
    Planning,
    Booked,
    InProgress,
    Completed,
    Cancelled,
}

impl PlanningStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningStatus::Planning => "planning",
            PlanningStatus::Booked => "booked",
            PlanningStatus::InProgress => "in_progress",
            PlanningStatus::Completed => "completed",
            PlanningStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for PlanningStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(PlanningStatus::Planning),
            "booked" => Ok(PlanningStatus::Booked),
            "in_progress" => Ok(PlanningStatus::InProgress),
            "completed" => Ok(PlanningStatus::Completed),
            "cancelled" => Ok(PlanningStatus::Cancelled),
            other => Err(anyhow::anyhow!("unknown planning status {}", other)),
        }
    }
}

/// A member's standing on one wedding.
#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    CoOwner,
    Planner,
    Coordinator,
    Family,
    #[default]
    Viewer,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::CoOwner => "co_owner",
            MemberRole::Planner => "planner",
            MemberRole::Coordinator => "coordinator",
            MemberRole::Family => "family",
            MemberRole::Viewer => "viewer",
        }
    }

    /// Family and viewers only read.
    pub fn can_edit(&self) -> bool {
        matches!(
            self,
            MemberRole::Owner | MemberRole::CoOwner | MemberRole::Planner | MemberRole::Coordinator
        )
    }

    pub fn can_manage_members(&self) -> bool {
        matches!(self, MemberRole::Owner | MemberRole::CoOwner)
    }
}

impl FromStr for MemberRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(MemberRole::Owner),
            "co_owner" => Ok(MemberRole::CoOwner),
            "planner" => Ok(MemberRole::Planner),
            "coordinator" => Ok(MemberRole::Coordinator),
            "family" => Ok(MemberRole::Family),
            "viewer" => Ok(MemberRole::Viewer),
            other => Err(anyhow::anyhow!("unknown member role {}", other)),
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    #[default]
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
        }
    }
}

impl FromStr for InvitationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "declined" => Ok(InvitationStatus::Declined),
            other => Err(anyhow::anyhow!("unknown invitation status {}", other)),
        }
    }
}
