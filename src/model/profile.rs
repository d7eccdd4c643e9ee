use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, NaiveDate};
use poem_openapi::Enum;
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.profile";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub wedding_date: Option<NaiveDate>,
    pub partner_name: Option<String>,
    pub city: Option<String>,
    pub last_sign_in_at: Option<DateTime<FixedOffset>>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Profile {
    pub fn role(&self) -> ProfileRole {
        self.role.parse().unwrap_or_default()
    }
}

/// Which dashboard a session may reach.
#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    #[default]
    User,
    Vendor,
    Admin,
}

impl ProfileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::User => "user",
            ProfileRole::Vendor => "vendor",
            ProfileRole::Admin => "admin",
        }
    }
}

impl fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ProfileRole::User),
            "vendor" => Ok(ProfileRole::Vendor),
            "admin" => Ok(ProfileRole::Admin),
            other => Err(anyhow::anyhow!("unknown profile role {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProfileRole;

    #[test]
    fn test_role_round_trip_from_db_text() {
        for role in [ProfileRole::User, ProfileRole::Vendor, ProfileRole::Admin] {
            assert_eq!(role.as_str().parse::<ProfileRole>().unwrap(), role);
        }
        assert!("planner".parse::<ProfileRole>().is_err());
    }
}
