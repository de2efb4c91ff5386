//! Progress dashboard data
//!
//! [`ProgressSource`] is the boundary the dashboard endpoints read from. The
//! in-memory adapter keeps per-subject category tallies and derives the
//! summary and detail views from them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::auth::Identity;
use crate::types::{Category, ProgressDetail, ProgressSummary, TimePeriod};
use crate::{Error, Result};

/// Progress data port
#[async_trait]
pub trait ProgressSource: Send + Sync {
    /// Overall progress for `caller`
    async fn summary(&self, caller: &Identity) -> Result<ProgressSummary>;

    /// Per-category breakdown for `caller`, filtered by period and category
    async fn details(
        &self,
        caller: &Identity,
        period: TimePeriod,
        category: Category,
    ) -> Result<Vec<ProgressDetail>>;
}

/// Completion counts for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTally {
    pub category: Category,
    pub completed_count: u64,
    pub total_count: u64,
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl CategoryTally {
    fn completion_percentage(&self) -> f64 {
        percentage(self.completed_count, self.total_count)
    }

    fn to_detail(&self) -> ProgressDetail {
        ProgressDetail {
            category: self.category,
            completed_count: self.completed_count,
            total_count: self.total_count,
            completion_percentage: self.completion_percentage(),
            last_completed_at: self.last_completed_at,
        }
    }
}

/// `part / whole * 100`, rounded to one decimal, 0 for an empty whole
fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Process-local progress tallies keyed by subject
#[derive(Default)]
pub struct InMemoryProgress {
    tallies: RwLock<HashMap<String, HashMap<Category, CategoryTally>>>,
}

impl InMemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the tally for `tally.category` of `subject`.
    pub async fn record(&self, subject: &str, tally: CategoryTally) -> Result<()> {
        if tally.category == Category::All {
            return Err(Error::invalid_request(
                "progress must be recorded against a concrete category",
            ));
        }
        if tally.completed_count > tally.total_count {
            return Err(Error::invalid_request(
                "completed_count cannot exceed total_count",
            ));
        }

        let mut tallies = self.tallies.write().await;
        tallies
            .entry(subject.to_string())
            .or_default()
            .insert(tally.category, tally);
        Ok(())
    }

    async fn tallies_for(&self, subject: &str) -> Vec<CategoryTally> {
        let tallies = self.tallies.read().await;
        let mut items: Vec<CategoryTally> = tallies
            .get(subject)
            .map(|by_category| by_category.values().cloned().collect())
            .unwrap_or_default();
        items.sort_by_key(|t| t.category as u8);
        items
    }
}

#[async_trait]
impl ProgressSource for InMemoryProgress {
    async fn summary(&self, caller: &Identity) -> Result<ProgressSummary> {
        let tallies = self.tallies_for(&caller.subject).await;

        let total_completed: u64 = tallies.iter().map(|t| t.completed_count).sum();
        let total: u64 = tallies.iter().map(|t| t.total_count).sum();

        Ok(ProgressSummary {
            total_completed,
            total_in_progress: total.saturating_sub(total_completed),
            completion_rate: percentage(total_completed, total),
            last_activity: tallies.iter().filter_map(|t| t.last_completed_at).max(),
        })
    }

    async fn details(
        &self,
        caller: &Identity,
        period: TimePeriod,
        category: Category,
    ) -> Result<Vec<ProgressDetail>> {
        let cutoff = period.window().map(|window| Utc::now() - window);

        Ok(self
            .tallies_for(&caller.subject)
            .await
            .iter()
            .filter(|t| category.matches(t.category))
            .filter(|t| match cutoff {
                None => true,
                Some(cutoff) => t.last_completed_at.is_some_and(|at| at >= cutoff),
            })
            .map(CategoryTally::to_detail)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tally(category: Category, completed: u64, total: u64, days_ago: Option<i64>) -> CategoryTally {
        CategoryTally {
            category,
            completed_count: completed,
            total_count: total,
            last_completed_at: days_ago.map(|d| Utc::now() - Duration::days(d)),
        }
    }

    #[tokio::test]
    async fn unknown_subject_has_empty_progress() {
        let progress = InMemoryProgress::new();
        let caller = Identity::new("nobody");

        let summary = progress.summary(&caller).await.unwrap();
        assert_eq!(summary.total_completed, 0);
        assert_eq!(summary.completion_rate, 0.0);
        assert!(summary.last_activity.is_none());

        let details = progress
            .details(&caller, TimePeriod::All, Category::All)
            .await
            .unwrap();
        assert!(details.is_empty());
    }

    #[tokio::test]
    async fn summary_sums_categories() {
        let progress = InMemoryProgress::new();
        progress
            .record("alice", tally(Category::Courses, 5, 10, Some(2)))
            .await
            .unwrap();
        progress
            .record("alice", tally(Category::Quizzes, 20, 25, Some(40)))
            .await
            .unwrap();

        let summary = progress.summary(&Identity::new("alice")).await.unwrap();
        assert_eq!(summary.total_completed, 25);
        assert_eq!(summary.total_in_progress, 10);
        assert_eq!(summary.completion_rate, 71.4);
        assert!(summary.last_activity.is_some());
    }

    #[tokio::test]
    async fn details_filter_by_period_and_category() {
        let progress = InMemoryProgress::new();
        let alice = Identity::new("alice");
        progress
            .record("alice", tally(Category::Courses, 5, 10, Some(2)))
            .await
            .unwrap();
        progress
            .record("alice", tally(Category::Projects, 1, 3, Some(90)))
            .await
            .unwrap();
        progress
            .record("alice", tally(Category::Assignments, 0, 4, None))
            .await
            .unwrap();

        let all = progress
            .details(&alice, TimePeriod::All, Category::All)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let week = progress
            .details(&alice, TimePeriod::Week, Category::All)
            .await
            .unwrap();
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].category, Category::Courses);
        assert_eq!(week[0].completion_percentage, 50.0);

        let projects = progress
            .details(&alice, TimePeriod::Year, Category::Projects)
            .await
            .unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].completion_percentage, 33.3);
    }

    #[tokio::test]
    async fn record_rejects_inconsistent_tallies() {
        let progress = InMemoryProgress::new();
        assert!(progress
            .record("alice", tally(Category::Courses, 11, 10, None))
            .await
            .is_err());
        assert!(progress
            .record("alice", tally(Category::All, 1, 10, None))
            .await
            .is_err());
    }
}
