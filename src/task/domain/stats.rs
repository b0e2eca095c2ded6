//! Aggregate counters over a user's tasks.

use super::{Priority, Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of a user's task list at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Number of tasks.
    pub total: u32,
    /// Tasks not yet started.
    pub pending: u32,
    /// Tasks being worked on.
    pub in_progress: u32,
    /// Finished tasks.
    pub completed: u32,
    /// Open tasks at high priority.
    pub high_priority_open: u32,
    /// Open tasks whose deadline has passed.
    pub overdue: u32,
    /// Share of completed tasks, 0 to 100, one decimal place.
    pub completion_rate_percent: f64,
    /// Mean hours from creation to completion, one decimal place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_completion_hours: Option<f64>,
}

impl TaskStats {
    /// Computes the summary for `tasks` as of `now`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "`rate` and `hours` divide completed counts and minute totals as f64"
    )]
    pub fn from_tasks(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let mut stats = Self::default();
        let mut completion_minutes: Vec<i64> = Vec::new();

        for task in tasks {
            stats.total += 1;
            match task.status() {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            if !task.status().is_completed() && task.priority() == Priority::High {
                stats.high_priority_open += 1;
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            if let Some(done) = task.completed_at() {
                completion_minutes.push((done - task.created_at()).num_minutes());
            }
        }

        if stats.total > 0 {
            let rate = f64::from(stats.completed) * 100.0 / f64::from(stats.total);
            stats.completion_rate_percent = round_one_decimal(rate);
        }
        if !completion_minutes.is_empty() {
            let total_minutes: i64 = completion_minutes.iter().sum();
            let count = u32::try_from(completion_minutes.len()).unwrap_or(u32::MAX);
            let hours = minutes_as_f64(total_minutes) / 60.0 / f64::from(count);
            stats.average_completion_hours = Some(round_one_decimal(hours));
        }
        stats
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "rounding a reported decimal"
)]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[expect(
    clippy::cast_precision_loss,
    reason = "minute totals stay far below 2^52"
)]
const fn minutes_as_f64(minutes: i64) -> f64 {
    minutes as f64
}
