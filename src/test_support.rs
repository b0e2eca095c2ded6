//! Shared fixtures for unit tests.

use crate::context::domain::{
    ContextContent, ContextEntry, ContextEntryId, EntryType, NewContextEntry,
};
use crate::task::domain::{NewTask, Priority, Task, TaskId, TaskPatch, TaskStatus, TaskTitle};
use crate::user::domain::UserId;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Noon on 2024-01-03, a Wednesday.
    pub fn standard() -> Self {
        Self::at(
            Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0)
                .single()
                .expect("valid fixed instant"),
        )
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub fn user_id(value: i64) -> UserId {
    UserId::new(value).expect("valid user id")
}

pub fn context_entry(
    id: i64,
    owner: i64,
    entry_type: EntryType,
    content: &str,
    clock: &FixedClock,
) -> ContextEntry {
    NewContextEntry::new(
        user_id(owner),
        ContextContent::new(content).expect("valid content"),
        entry_type,
        clock,
    )
    .into_entry(ContextEntryId::new(id).expect("valid entry id"))
}

pub fn task(id: i64, owner: i64, title: &str, priority: Priority, clock: &FixedClock) -> Task {
    NewTask::new(
        user_id(owner),
        TaskTitle::new(title).expect("valid title"),
        clock,
    )
    .with_priority(priority)
    .into_task(TaskId::new(id).expect("valid task id"))
}

pub fn completed(mut task: Task, clock: &FixedClock) -> Task {
    task.apply_patch(TaskPatch::new().with_status(TaskStatus::Completed), clock);
    task
}
