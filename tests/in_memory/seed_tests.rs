//! Demo data seeding.

use crate::test_helpers::TestApp;
use rstest::{fixture, rstest};
use smart_todo::seed::{DEMO_EMAIL, seed_demo};
use smart_todo::task::domain::{TaskFilter, TaskStatus};

#[fixture]
fn app() -> TestApp {
    TestApp::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_run_provisions_user_tasks_and_context(app: TestApp) {
    let report = seed_demo(&app.state).await.expect("seed should succeed");

    assert_eq!(report.user.email().as_str(), DEMO_EMAIL);
    assert_eq!(report.entries_created, 5);
    assert_eq!(report.tasks_created, 5);

    let tasks = app
        .state
        .tasks
        .list(report.user.id(), &TaskFilter::default())
        .await
        .expect("list tasks");
    assert_eq!(tasks.len(), 5);
    assert_eq!(
        tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::Completed)
            .count(),
        1
    );
    assert_eq!(
        tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::InProgress)
            .count(),
        1
    );
    assert_eq!(app.assistant.call_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rerunning_reuses_the_user_and_adds_nothing(app: TestApp) {
    let first = seed_demo(&app.state).await.expect("first seed");
    let second = seed_demo(&app.state).await.expect("second seed");

    assert_eq!(second.user.id(), first.user.id());
    assert_eq!(second.entries_created, 0);
    assert_eq!(second.tasks_created, 0);

    let tasks = app
        .state
        .tasks
        .list(first.user.id(), &TaskFilter::default())
        .await
        .expect("list tasks");
    assert_eq!(tasks.len(), 5);
}
