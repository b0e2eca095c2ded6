//! When steps for task creation BDD scenarios.

use super::world::{TaskCreationWorld, run_async};
use rstest_bdd_macros::when;
use smart_todo::task::services::{CreateTaskRequest, CreationMode};

fn create(world: &mut TaskCreationWorld, title: String, mode: CreationMode) {
    let request = CreateTaskRequest::new(world.owner, title).with_mode(mode);
    world.last_result = Some(run_async(world.app.state.tasks.create(request)));
}

#[when(r#"the user creates the task "{title}" manually"#)]
fn creates_manually(world: &mut TaskCreationWorld, title: String) {
    create(world, title, CreationMode::Manual);
}

#[when(r#"the user creates the task "{title}" with a suggestion"#)]
fn creates_with_suggestion(world: &mut TaskCreationWorld, title: String) {
    create(world, title, CreationMode::AiSuggested);
}

#[when(r#"the user creates the task "{title}" from natural language"#)]
fn creates_from_natural_language(world: &mut TaskCreationWorld, title: String) {
    create(world, title, CreationMode::NaturalLanguage);
}
