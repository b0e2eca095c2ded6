//! Demo user and sample data.
//!
//! Seeding is repeatable: the demo user is reused when present, and each
//! sample task or context entry is written only when the user has none with
//! the same title or content.

use crate::api::AppState;
use crate::context::{
    domain::{ContextWindow, EntryType},
    services::{ContextJournalError, RecordContextRequest},
};
use crate::task::{
    domain::{Priority, TaskFilter, TaskPatch, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleError},
};
use crate::user::{
    domain::User,
    services::{RegisterUserRequest, UserDirectoryError},
};
use chrono::{Days, Duration};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

/// Email address of the demo user.
pub const DEMO_EMAIL: &str = "demo@example.com";
/// Display name of the demo user.
pub const DEMO_NAME: &str = "Demo User";

/// How far back existing entries are checked for duplicates.
const LOOKBACK_DAYS: i64 = 3650;

struct SampleEntry {
    content: &'static str,
    entry_type: EntryType,
    days_ago: u64,
}

struct SampleTask {
    title: &'static str,
    description: &'static str,
    priority: Priority,
    status: TaskStatus,
    due_in_days: Option<i64>,
}

const SAMPLE_ENTRIES: [SampleEntry; 5] = [
    SampleEntry {
        content: "Email from client: the latest delivery has several blocking bugs. \
                  They need a fix deployed by tomorrow evening ahead of their launch.",
        entry_type: EntryType::Email,
        days_ago: 0,
    },
    SampleEntry {
        content: "Plan the team offsite for next quarter: book a venue, arrange travel \
                  for fifteen people, and agree the agenda.",
        entry_type: EntryType::Note,
        days_ago: 0,
    },
    SampleEntry {
        content: "Team lead: great job on today's presentation, the new dashboard \
                  mockups landed well.",
        entry_type: EntryType::Message,
        days_ago: 1,
    },
    SampleEntry {
        content: "Mum's birthday is next Saturday. Buy a gift and a card, and book a \
                  table for dinner.",
        entry_type: EntryType::Note,
        days_ago: 2,
    },
    SampleEntry {
        content: "Q4 budget sync: finance needs every department proposal by month end. \
                  Outline the costs for the platform migration.",
        entry_type: EntryType::Meeting,
        days_ago: 3,
    },
];

const SAMPLE_TASKS: [SampleTask; 5] = [
    SampleTask {
        title: "Fix blocking bugs in client delivery",
        description: "Address the issues raised in the client's email and deploy a hotfix.",
        priority: Priority::High,
        status: TaskStatus::InProgress,
        due_in_days: Some(1),
    },
    SampleTask {
        title: "Prepare Q4 budget proposal",
        description: "Outline the expected platform migration costs for next quarter.",
        priority: Priority::High,
        status: TaskStatus::Pending,
        due_in_days: Some(10),
    },
    SampleTask {
        title: "Buy birthday gift",
        description: "Find a gift and a card before Saturday.",
        priority: Priority::Medium,
        status: TaskStatus::Pending,
        due_in_days: Some(5),
    },
    SampleTask {
        title: "Schedule annual health check-up",
        description: "Find a suitable date and book the appointment.",
        priority: Priority::Low,
        status: TaskStatus::Pending,
        due_in_days: Some(30),
    },
    SampleTask {
        title: "Finalise dashboard mockups",
        description: "Fold in the presentation feedback and hand the designs over.",
        priority: Priority::Medium,
        status: TaskStatus::Completed,
        due_in_days: None,
    },
];

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Provisioning the demo user failed.
    #[error(transparent)]
    User(#[from] UserDirectoryError),
    /// Writing a sample task failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),
    /// Writing a sample context entry failed.
    #[error(transparent)]
    Context(#[from] ContextJournalError),
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// The demo user, new or reused.
    pub user: User,
    /// Context entries written by this run.
    pub entries_created: usize,
    /// Tasks written by this run.
    pub tasks_created: usize,
}

/// Provisions the demo user and whichever sample records it lacks.
///
/// # Errors
///
/// Returns [`SeedError`] when any store operation fails.
pub async fn seed_demo(state: &AppState) -> Result<SeedReport, SeedError> {
    let user = state
        .users
        .ensure(RegisterUserRequest::new(DEMO_EMAIL, DEMO_NAME))
        .await?;
    let entries_created = seed_entries(state, &user).await?;
    let tasks_created = seed_tasks(state, &user).await?;

    info!(
        user_id = %user.id(),
        entries_created,
        tasks_created,
        "demo data seeded"
    );
    Ok(SeedReport {
        user,
        entries_created,
        tasks_created,
    })
}

async fn seed_entries(state: &AppState, user: &User) -> Result<usize, SeedError> {
    let lookback =
        ContextWindow::new(LOOKBACK_DAYS).map_err(|err| SeedError::Context(err.into()))?;
    let existing = state.journal.list_recent(user.id(), lookback).await?;
    let today = state.clock.utc().date_naive();

    let mut created = 0;
    for sample in &SAMPLE_ENTRIES {
        if existing
            .iter()
            .any(|entry| entry.content().as_str() == sample.content)
        {
            continue;
        }
        let date = today
            .checked_sub_days(Days::new(sample.days_ago))
            .unwrap_or(today);
        state
            .journal
            .record(
                RecordContextRequest::new(user.id(), sample.content, sample.entry_type)
                    .with_entry_date(date),
            )
            .await?;
        created += 1;
    }
    Ok(created)
}

async fn seed_tasks(state: &AppState, user: &User) -> Result<usize, SeedError> {
    let existing = state.tasks.list(user.id(), &TaskFilter::default()).await?;
    let now = state.clock.utc();

    let mut created = 0;
    for sample in &SAMPLE_TASKS {
        if existing.iter().any(|task| task.title().matches(sample.title)) {
            continue;
        }
        let task = state
            .tasks
            .create(
                CreateTaskRequest::new(user.id(), sample.title)
                    .with_description(sample.description)
                    .with_priority(sample.priority),
            )
            .await?;

        let mut patch = TaskPatch::new();
        if let Some(days) = sample.due_in_days {
            patch = patch.with_deadline(Some(now + Duration::days(days)));
        }
        if sample.status != TaskStatus::Pending {
            patch = patch.with_status(sample.status);
        }
        if !patch.is_empty() {
            state.tasks.update(task.id(), patch).await?;
        }
        created += 1;
    }
    Ok(created)
}

