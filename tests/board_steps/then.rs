//! Then steps for board BDD scenarios.

use super::world::{BoardWorld, column};
use rstest_bdd_macros::then;
use taskboard::board::domain::TaskId;

#[then(r#"column "{column_id}" lists "{ids}""#)]
fn column_lists(world: &BoardWorld, column_id: String, ids: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = ids.split(',').map(str::trim).collect();
    let actual: Vec<String> = world
        .store
        .tasks(&column(&column_id)?)
        .iter()
        .map(|task| task.id().as_str().to_owned())
        .collect();

    if actual != expected {
        return Err(eyre::eyre!(
            "expected column {column_id} to list {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"column "{column_id}" is empty"#)]
fn column_is_empty(world: &BoardWorld, column_id: String) -> Result<(), eyre::Report> {
    let tasks = world.store.tasks(&column(&column_id)?);
    eyre::ensure!(tasks.is_empty(), "expected column {column_id} to be empty");
    Ok(())
}

#[then(r#"task "{id}" has status "{status}""#)]
fn task_has_status(world: &BoardWorld, id: String, status: String) -> Result<(), eyre::Report> {
    let task = world
        .store
        .get_task_by_id(&TaskId::new(id))
        .ok_or_else(|| eyre::eyre!("missing task on the board"))?;
    eyre::ensure!(
        task.status() == status,
        "expected status {status}, found {}",
        task.status()
    );
    Ok(())
}

#[then("the last operation failed")]
fn last_operation_failed(world: &BoardWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no operation recorded"))?;
    eyre::ensure!(outcome.is_err(), "expected a failure, got {outcome:?}");
    Ok(())
}

#[then(r#"task "{id}" has {count:usize} persisted comment"#)]
fn task_has_persisted_comments(
    world: &BoardWorld,
    id: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let comments = world.store.comments(&TaskId::new(id));
    let persisted = comments.iter().filter(|comment| comment.id().is_some()).count();
    eyre::ensure!(
        persisted == count,
        "expected {count} persisted comments, found {persisted}"
    );
    Ok(())
}
