//! Context store behaviour.

use super::helpers::{clock, owner};
use crate::test_helpers::FixedClock;
use chrono::{Days, NaiveDate};
use mockable::Clock;
use rstest::rstest;
use smart_todo::context::{
    adapters::memory::InMemoryContextRepository,
    domain::{ContextContent, ContextWindow, EntryType, NewContextEntry},
    ports::ContextRepository,
};
use smart_todo::user::domain::UserId;
use std::sync::Arc;

fn days_ago(clock: &FixedClock, days: u64) -> NaiveDate {
    clock
        .utc()
        .date_naive()
        .checked_sub_days(Days::new(days))
        .expect("date in range")
}

async fn record(
    repo: &InMemoryContextRepository,
    owner: UserId,
    content: &str,
    date: NaiveDate,
    clock: &FixedClock,
) {
    let entry = NewContextEntry::new(
        owner,
        ContextContent::new(content).expect("valid content"),
        EntryType::Note,
        clock,
    )
    .with_entry_date(date);
    repo.create(entry).await.expect("create");
}

fn contents(entries: &[smart_todo::context::domain::ContextEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.content().as_str()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_window_keeps_the_last_week(clock: Arc<FixedClock>, owner: UserId) {
    let repo = InMemoryContextRepository::new();
    record(&repo, owner, "today", days_ago(&clock, 0), &clock).await;
    record(&repo, owner, "three days ago", days_ago(&clock, 3), &clock).await;
    record(&repo, owner, "ten days ago", days_ago(&clock, 10), &clock).await;

    let since = ContextWindow::default().since_today(&*clock);
    let entries = repo.list_since(owner, since).await.expect("list");

    assert_eq!(contents(&entries), vec!["today", "three days ago"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn window_boundary_is_inclusive(clock: Arc<FixedClock>, owner: UserId) {
    let repo = InMemoryContextRepository::new();
    record(&repo, owner, "on the boundary", days_ago(&clock, 7), &clock).await;
    record(&repo, owner, "just outside", days_ago(&clock, 8), &clock).await;

    let since = ContextWindow::new(7).expect("valid window").since_today(&*clock);
    let entries = repo.list_since(owner, since).await.expect("list");

    assert_eq!(contents(&entries), vec!["on the boundary"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_day_entries_list_latest_first(clock: Arc<FixedClock>, owner: UserId) {
    let repo = InMemoryContextRepository::new();
    let today = days_ago(&clock, 0);
    record(&repo, owner, "morning", today, &clock).await;
    clock.advance(chrono::Duration::hours(3));
    record(&repo, owner, "afternoon", today, &clock).await;

    let entries = repo.list_since(owner, today).await.expect("list");

    assert_eq!(contents(&entries), vec!["afternoon", "morning"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_owners_are_excluded(clock: Arc<FixedClock>, owner: UserId) {
    let repo = InMemoryContextRepository::new();
    let other = UserId::new(2).expect("valid user id");
    record(&repo, other, "not mine", days_ago(&clock, 0), &clock).await;

    let entries = repo
        .list_since(owner, days_ago(&clock, 30))
        .await
        .expect("list");

    assert!(entries.is_empty());
}
