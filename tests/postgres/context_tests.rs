//! Context adapter tests.

use super::helpers::{database, provision_user};
use crate::test_helpers::FixedClock;
use chrono::{Days, Duration};
use mockable::Clock;
use smart_todo::context::{
    adapters::postgres::PostgresContextRepository,
    domain::{ContextContent, ContextWindow, EntryType, NewContextEntry},
    ports::ContextRepository,
};

#[tokio::test(flavor = "multi_thread")]
async fn window_and_recency_order_match_the_memory_store() {
    let Some(pool) = database().await else {
        return;
    };
    let clock = FixedClock::standard();
    let owner = provision_user(&pool, &clock).await;
    let repo = PostgresContextRepository::new(pool);
    let today = clock.utc().date_naive();

    for (content, days_ago) in [("three days ago", 3), ("ten days ago", 10), ("today", 0)] {
        let date = today
            .checked_sub_days(Days::new(days_ago))
            .expect("date in range");
        repo.create(
            NewContextEntry::new(
                owner.id(),
                ContextContent::new(content).expect("valid content"),
                EntryType::Email,
                &clock,
            )
            .with_entry_date(date),
        )
        .await
        .expect("create");
        clock.advance(Duration::minutes(1));
    }

    let since = ContextWindow::default().since(today);
    let entries = repo.list_since(owner.id(), since).await.expect("list");
    let contents: Vec<&str> = entries
        .iter()
        .map(|entry| entry.content().as_str())
        .collect();

    assert_eq!(contents, vec!["today", "three days ago"]);
    assert!(entries.iter().all(|entry| entry.entry_type() == EntryType::Email));
}
