//! Task store behaviour.

use super::helpers::{clock, owner};
use crate::test_helpers::FixedClock;
use chrono::Duration;
use mockable::Clock;
use rstest::rstest;
use smart_todo::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, Priority, TaskChange, TaskId, TaskPatch, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use smart_todo::user::domain::UserId;
use std::sync::Arc;

fn draft(owner: UserId, title: &str, priority: Priority, clock: &FixedClock) -> NewTask {
    NewTask::new(owner, TaskTitle::new(title).expect("valid title"), clock).with_priority(priority)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_orders_by_completion_priority_then_deadline(clock: Arc<FixedClock>, owner: UserId) {
    let repo = InMemoryTaskRepository::new();
    let soon = clock.utc() + Duration::days(1);
    let later = clock.utc() + Duration::days(5);

    let undated = repo
        .create(draft(owner, "Undated high", Priority::High, &clock))
        .await
        .expect("create");
    let dated_later = repo
        .create(draft(owner, "Later high", Priority::High, &clock).with_deadline(later))
        .await
        .expect("create");
    let dated_soon = repo
        .create(draft(owner, "Soon high", Priority::High, &clock).with_deadline(soon))
        .await
        .expect("create");
    let low = repo
        .create(draft(owner, "Low", Priority::Low, &clock))
        .await
        .expect("create");
    let created = repo
        .create(draft(owner, "Finished high", Priority::High, &clock))
        .await
        .expect("create");
    let finished = repo
        .modify(
            created.id(),
            TaskChange::Patch(TaskPatch::new().with_status(TaskStatus::Completed)),
            clock.utc(),
        )
        .await
        .expect("modify");

    let ids: Vec<TaskId> = repo
        .list_for_user(owner)
        .await
        .expect("list")
        .iter()
        .map(|task| task.id())
        .collect();

    assert_eq!(
        ids,
        vec![
            dated_soon.id(),
            dated_later.id(),
            undated.id(),
            low.id(),
            finished.id()
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_is_scoped_to_the_owner(clock: Arc<FixedClock>, owner: UserId) {
    let repo = InMemoryTaskRepository::new();
    let other = UserId::new(2).expect("valid user id");
    repo.create(draft(owner, "Mine", Priority::Low, &clock))
        .await
        .expect("create");
    repo.create(draft(other, "Theirs", Priority::Low, &clock))
        .await
        .expect("create");

    let mine = repo.list_for_user(owner).await.expect("list");

    assert_eq!(mine.len(), 1);
    assert!(mine.iter().all(|task| task.user_id() == owner));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn modify_persists_patched_fields(clock: Arc<FixedClock>, owner: UserId) {
    let repo = InMemoryTaskRepository::new();
    let task = repo
        .create(draft(owner, "Draft memo", Priority::Medium, &clock))
        .await
        .expect("create");

    clock.advance(Duration::hours(2));
    let returned = repo
        .modify(
            task.id(),
            TaskChange::Patch(TaskPatch::new().with_status(TaskStatus::InProgress)),
            clock.utc(),
        )
        .await
        .expect("modify");

    let stored = repo
        .find_by_id(task.id())
        .await
        .expect("lookup")
        .expect("task exists");
    assert_eq!(stored, returned);
    assert_eq!(stored.status(), TaskStatus::InProgress);
    assert!(stored.updated_at() > stored.created_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_patches_to_one_task_all_land(clock: Arc<FixedClock>, owner: UserId) {
    let repo = Arc::new(InMemoryTaskRepository::new());
    let task = repo
        .create(draft(owner, "Plan offsite", Priority::Low, &clock))
        .await
        .expect("create");
    let id = task.id();
    let now = clock.utc();

    let patches = [
        TaskPatch::new().with_title(TaskTitle::new("Plan team offsite").expect("valid title")),
        TaskPatch::new().with_priority(Priority::High),
        TaskPatch::new().with_description(Some("Venue, travel, agenda".to_owned())),
        TaskPatch::new().with_deadline(Some(now + Duration::days(14))),
        TaskPatch::new().with_status(TaskStatus::InProgress),
    ];
    let handles: Vec<_> = patches
        .into_iter()
        .map(|patch| {
            let shared = Arc::clone(&repo);
            tokio::spawn(async move { shared.modify(id, TaskChange::Patch(patch), now).await })
        })
        .collect();
    for handle in handles {
        handle.await.expect("join").expect("modify");
    }

    let stored = repo.find_by_id(id).await.expect("lookup").expect("task exists");
    assert_eq!(stored.title().as_str(), "Plan team offsite");
    assert_eq!(stored.priority(), Priority::High);
    assert_eq!(stored.description(), Some("Venue, travel, agenda"));
    assert_eq!(stored.deadline(), Some(now + Duration::days(14)));
    assert_eq!(stored.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn modifying_an_unknown_task_is_not_found(clock: Arc<FixedClock>, owner: UserId) {
    let repo = InMemoryTaskRepository::new();
    let task = repo
        .create(draft(owner, "Ephemeral", Priority::Low, &clock))
        .await
        .expect("create");
    assert!(repo.delete(task.id()).await.expect("delete"));

    let result = repo
        .modify(task.id(), TaskChange::ToggleCompletion, clock.utc())
        .await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_whether_a_row_was_removed(clock: Arc<FixedClock>, owner: UserId) {
    let repo = InMemoryTaskRepository::new();
    let task = repo
        .create(draft(owner, "Cancel gym", Priority::Low, &clock))
        .await
        .expect("create");

    assert!(repo.delete(task.id()).await.expect("first delete"));
    assert!(!repo.delete(task.id()).await.expect("second delete"));
    assert!(repo.find_by_id(task.id()).await.expect("lookup").is_none());
}
