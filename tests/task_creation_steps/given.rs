//! Given steps for task creation BDD scenarios.

use super::world::{TaskCreationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;
use smart_todo::assistant::ports::{CompletionError, CompletionErrorKind};
use smart_todo::context::{domain::EntryType, services::RecordContextRequest};

#[given(r#"recent context "{content}""#)]
fn recent_context(world: &mut TaskCreationWorld, content: String) -> Result<(), eyre::Report> {
    run_async(world.app.state.journal.record(RecordContextRequest::new(
        world.owner,
        content,
        EntryType::Note,
    )))
    .wrap_err("record context for scenario")?;
    Ok(())
}

#[given(r#"the assistant suggests priority {priority} because "{reasoning}""#)]
fn assistant_suggests(world: &mut TaskCreationWorld, priority: i64, reasoning: String) {
    world.app.assistant.push_reply(json!({
        "priority": priority,
        "deadline": null,
        "reasoning": reasoning,
        "contextTags": []
    }));
}

#[given(r#"the assistant parses the input as "{title}" with priority {priority}"#)]
fn assistant_parses(world: &mut TaskCreationWorld, title: String, priority: i64) {
    world.app.assistant.push_reply(json!({
        "title": title,
        "description": null,
        "priority": priority,
        "deadline": null,
        "contextTags": []
    }));
}

#[given("the assistant is unavailable")]
fn assistant_unavailable(world: &mut TaskCreationWorld) {
    world.app.assistant.push_failure(CompletionError::new(
        CompletionErrorKind::Network,
        "connection refused",
    ));
}
