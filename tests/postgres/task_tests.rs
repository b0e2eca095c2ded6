//! Task adapter tests.

use super::helpers::{database, provision_user};
use crate::test_helpers::FixedClock;
use chrono::Duration;
use mockable::Clock;
use smart_todo::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{
        AiSuggestion, ContextTags, NewTask, Priority, TaskChange, TaskPatch, TaskStatus,
        TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use smart_todo::user::domain::UserId;

fn title(text: &str) -> TaskTitle {
    TaskTitle::new(text).expect("valid title")
}

#[tokio::test(flavor = "multi_thread")]
async fn assisted_fields_round_trip() {
    let Some(pool) = database().await else {
        return;
    };
    let clock = FixedClock::standard();
    let owner = provision_user(&pool, &clock).await;
    let repo = PostgresTaskRepository::new(pool);

    let created = repo
        .create(
            NewTask::new(owner.id(), title("Ship hotfix"), &clock)
                .with_description("Client is blocked")
                .with_context_tags(ContextTags::from(vec![
                    "client".to_owned(),
                    "urgent".to_owned(),
                ]))
                .with_promoted_suggestion(AiSuggestion {
                    priority: Priority::High,
                    deadline: Some(clock.utc() + Duration::days(1)),
                    reasoning: Some("Launch is tomorrow.".to_owned()),
                }),
        )
        .await
        .expect("create");

    let stored = repo
        .find_by_id(created.id())
        .await
        .expect("lookup")
        .expect("task exists");
    assert_eq!(stored, created);
    assert_eq!(stored.priority(), Priority::High);
    assert_eq!(stored.ai_suggested_priority(), Some(Priority::High));
    assert_eq!(stored.ai_reasoning(), Some("Launch is tomorrow."));
    assert_eq!(stored.context_tags().as_slice(), ["client", "urgent"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_follows_urgency_order() {
    let Some(pool) = database().await else {
        return;
    };
    let clock = FixedClock::standard();
    let owner = provision_user(&pool, &clock).await;
    let repo = PostgresTaskRepository::new(pool);

    let low = repo
        .create(NewTask::new(owner.id(), title("Tidy desk"), &clock).with_priority(Priority::Low))
        .await
        .expect("create");
    let high = repo
        .create(
            NewTask::new(owner.id(), title("Pay invoice"), &clock).with_priority(Priority::High),
        )
        .await
        .expect("create");
    let booked = repo
        .create(
            NewTask::new(owner.id(), title("Book flights"), &clock).with_priority(Priority::High),
        )
        .await
        .expect("create");
    let done = repo
        .modify(
            booked.id(),
            TaskChange::Patch(TaskPatch::new().with_status(TaskStatus::Completed)),
            clock.utc(),
        )
        .await
        .expect("modify");

    let ids: Vec<_> = repo
        .list_for_user(owner.id())
        .await
        .expect("list")
        .iter()
        .map(|task| task.id())
        .collect();

    assert_eq!(ids, vec![high.id(), low.id(), done.id()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_owner_is_reported() {
    let Some(pool) = database().await else {
        return;
    };
    let clock = FixedClock::standard();
    let repo = PostgresTaskRepository::new(pool);
    let ghost = UserId::new(i64::MAX).expect("valid user id");

    let result = repo
        .create(NewTask::new(ghost, title("Orphan"), &clock))
        .await;

    assert!(matches!(result, Err(TaskRepositoryError::UnknownUser(id)) if id == ghost));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_removal_once() {
    let Some(pool) = database().await else {
        return;
    };
    let clock = FixedClock::standard();
    let owner = provision_user(&pool, &clock).await;
    let repo = PostgresTaskRepository::new(pool);
    let task = repo
        .create(NewTask::new(owner.id(), title("Cancel gym"), &clock))
        .await
        .expect("create");

    assert!(repo.delete(task.id()).await.expect("first delete"));
    assert!(!repo.delete(task.id()).await.expect("second delete"));
    let result = repo
        .modify(task.id(), TaskChange::ToggleCompletion, clock.utc())
        .await;
    assert!(matches!(result, Err(TaskRepositoryError::NotFound(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_patches_keep_every_field() {
    let Some(pool) = database().await else {
        return;
    };
    let clock = FixedClock::standard();
    let owner = provision_user(&pool, &clock).await;
    let repo = std::sync::Arc::new(PostgresTaskRepository::new(pool));
    let task = repo
        .create(NewTask::new(owner.id(), title("Renew passport"), &clock))
        .await
        .expect("create");
    let id = task.id();
    let now = clock.utc();

    let titled = {
        let shared = std::sync::Arc::clone(&repo);
        tokio::spawn(async move {
            let patch = TaskPatch::new().with_title(title("Renew passport before June"));
            shared.modify(id, TaskChange::Patch(patch), now).await
        })
    };
    let prioritised = {
        let shared = std::sync::Arc::clone(&repo);
        tokio::spawn(async move {
            let patch = TaskPatch::new().with_priority(Priority::High);
            shared.modify(id, TaskChange::Patch(patch), now).await
        })
    };
    titled.await.expect("join").expect("title patch");
    prioritised.await.expect("join").expect("priority patch");

    let stored = repo.find_by_id(id).await.expect("lookup").expect("task exists");
    assert_eq!(stored.title().as_str(), "Renew passport before June");
    assert_eq!(stored.priority(), Priority::High);
}
