use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use poem_openapi::Enum;
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.budget_item";

/// Expense categories as `(id, label)`.
pub const BUDGET_CATEGORIES: [(&str, &str); 11] = [
    ("venue-catering", "Venue & Catering"),
    ("photography", "Photography & Video"),
    ("decoration", "Decoration & Flowers"),
    ("entertainment", "Entertainment & Music"),
    ("attire", "Attire & Jewelry"),
    ("makeup", "Makeup & Hair"),
    ("invitations", "Invitations"),
    ("transportation", "Transportation"),
    ("gifts", "Gifts & Favors"),
    ("accommodation", "Accommodation"),
    ("miscellaneous", "Miscellaneous"),
];

pub fn is_budget_category(id: &str) -> bool {
    BUDGET_CATEGORIES.iter().any(|(key, _)| *key == id)
}

#[derive(Clone, Debug, FromRow)]
pub struct BudgetItem {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub category: Option<String>,
    pub name: String,
    pub estimated_cost: i64,
    pub actual_cost: Option<i64>,
    pub amount_paid: i64,
    pub payment_status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl BudgetItem {
    /// Actual cost once known, the estimate before that.
    pub fn cost(&self) -> i64 {
        self.actual_cost.unwrap_or(self.estimated_cost)
    }

    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::derive(self.amount_paid, self.cost())
    }
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }

    /// Nothing paid is pending, paying at least the cost is paid.
    pub fn derive(amount_paid: i64, cost: i64) -> Self {
        if amount_paid <= 0 {
            PaymentStatus::Pending
        } else if amount_paid >= cost {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "partial" => Ok(PaymentStatus::Partial),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(anyhow::anyhow!("unknown payment status {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_derive() {
        assert_eq!(PaymentStatus::derive(0, 500_000), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::derive(100_000, 500_000), PaymentStatus::Partial);
        assert_eq!(PaymentStatus::derive(500_000, 500_000), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::derive(600_000, 500_000), PaymentStatus::Paid);
    }

    #[test]
    fn test_budget_category() {
        assert!(is_budget_category("photography"));
        assert!(!is_budget_category("Photography"));
        assert_eq!(BUDGET_CATEGORIES.len(), 11);
    }
}
