use chrono::{DateTime, FixedOffset};
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.shortlist";

#[derive(Clone, Debug, FromRow)]
pub struct Shortlist {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub venue_id: Uuid,
    pub notes: Option<String>,
    pub event_type: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}
