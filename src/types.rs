//! Core types for diginativa

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Feature ID type (UUID v4, rendered as a string on the wire)
pub type FeatureId = String;

/// Lifecycle status of a feature
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeatureStatus {
    Active,
    Inactive,
    Deprecated,
}

impl FeatureStatus {
    pub const ALL: [FeatureStatus; 3] = [
        FeatureStatus::Active,
        FeatureStatus::Inactive,
        FeatureStatus::Deprecated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureStatus::Active => "active",
            FeatureStatus::Inactive => "inactive",
            FeatureStatus::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown feature status: {s}"))
    }
}

/// A stored feature. `id` and both timestamps are assigned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    pub id: FeatureId,
    pub name: String,
    pub description: String,
    pub status: FeatureStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Accepted create payload, produced by the validation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeature {
    pub name: String,
    pub description: String,
    pub status: FeatureStatus,
}

impl NewFeature {
    /// Stamp the payload with a fresh identifier and timestamps.
    pub fn into_feature(self, now: DateTime<Utc>) -> Feature {
        Feature {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            description: self.description,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One page of the feature listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeaturePage {
    pub features: Vec<Feature>,
    pub total_count: usize,
    pub page: u32,
    pub page_size: u32,
}

/// Reporting window for progress details
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimePeriod {
    /// Length of the window, `None` for an unbounded period.
    pub fn window(&self) -> Option<chrono::Duration> {
        match self {
            TimePeriod::Day => Some(chrono::Duration::days(1)),
            TimePeriod::Week => Some(chrono::Duration::days(7)),
            TimePeriod::Month => Some(chrono::Duration::days(30)),
            TimePeriod::Year => Some(chrono::Duration::days(365)),
            TimePeriod::All => None,
        }
    }
}

/// Learning activity category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Courses,
    Assignments,
    Quizzes,
    Projects,
    #[default]
    All,
}

impl Category {
    pub fn matches(&self, other: Category) -> bool {
        *self == Category::All || *self == other
    }
}

/// Per-category progress counts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressDetail {
    pub category: Category,
    pub completed_count: u64,
    pub total_count: u64,
    pub completion_percentage: f64,
    pub last_completed_at: Option<DateTime<Utc>>,
}

/// Overall progress for one caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSummary {
    pub total_completed: u64,
    pub total_in_progress: u64,
    pub completion_rate: f64,
    pub last_activity: Option<DateTime<Utc>>,
}
