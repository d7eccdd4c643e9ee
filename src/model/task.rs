use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use poem_openapi::Enum;
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.task";

#[derive(Clone, Debug, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub priority: String,
    pub completed_at: Option<DateTime<FixedOffset>>,
    pub display_order: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Task {
    /// `completed_at` is stamped on entering `completed` and cleared on leaving it.
    pub fn set_status(&mut self, status: TaskStatus, now: DateTime<FixedOffset>) {
        if status == TaskStatus::Completed {
            if self.completed_at.is_none() {
                self.completed_at = Some(now);
            }
        } else {
            self.completed_at = None;
        }
        self.status = status.as_str().to_string();
    }
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Skipped,
    Overdue,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
            TaskStatus::Overdue => "overdue",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "skipped" => Ok(TaskStatus::Skipped),
            "overdue" => Ok(TaskStatus::Overdue),
            other => Err(anyhow::anyhow!("unknown task status {}", other)),
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            other => Err(anyhow::anyhow!("unknown task priority {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};

    use super::*;

    fn task() -> Task {
        let now = Local::now().fixed_offset();
        Task {
            id: Uuid::now_v7(),
            wedding_id: Uuid::now_v7(),
            title: "Book photographer".to_string(),
            description: None,
            category: None,
            due_date: None,
            status: "pending".to_string(),
            priority: "medium".to_string(),
            completed_at: None,
            display_order: 0,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_set_status_stamps_completion() {
        let mut task = task();
        let now = Local::now().fixed_offset();
        task.set_status(TaskStatus::Completed, now);
        assert_eq!(task.status, "completed");
        assert_eq!(task.completed_at, Some(now));

        // Completing again keeps the first stamp
        task.set_status(TaskStatus::Completed, now + Duration::hours(1));
        assert_eq!(task.completed_at, Some(now));

        task.set_status(TaskStatus::InProgress, now);
        assert_eq!(task.status, "in_progress");
        assert!(task.completed_at.is_none());
    }
}
