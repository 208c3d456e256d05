//! Announcement Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Announcement priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Company announcement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Free-form category (General, Policy, Event, Holiday, ...)
    pub announcement_type: String,
    pub priority: Priority,
    pub published_by: String,
    pub published_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    /// Empty list targets all departments
    #[serde(default)]
    pub target_departments: Vec<String>,
}
