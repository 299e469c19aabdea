//! When steps for board BDD scenarios.

use super::world::{BoardWorld, column, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::board::domain::{TaskDraft, TaskId, TaskPatch};

#[when(r#"a task titled "{title}" is created in column "{column_id}""#)]
fn create_task(
    world: &mut BoardWorld,
    title: String,
    column_id: String,
) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new(title).wrap_err("build scenario draft")?;
    let ticket = world
        .store
        .create_task(draft, &column(&column_id)?)
        .wrap_err("start task creation")?;
    run_async(ticket.settled()).wrap_err("persist created task")?;
    Ok(())
}

#[when(r#"task "{id}" is moved from "{source}" to "{dest}" at position {position:usize}"#)]
fn move_task(
    world: &mut BoardWorld,
    id: String,
    source: String,
    dest: String,
    position: usize,
) -> Result<(), eyre::Report> {
    let pending = world.store.move_task(
        &TaskId::new(id),
        &column(&source)?,
        &column(&dest)?,
        Some(position),
    );
    world.last_outcome = Some(run_async(pending.settled()));
    Ok(())
}

#[when(r#"a remote patch sets task "{id}" status to "{status}""#)]
fn remote_status_patch(world: &mut BoardWorld, id: String, status: String) -> Result<(), eyre::Report> {
    let mut patch = TaskPatch::new(TaskId::new(id));
    patch.status = Some(status);
    eyre::ensure!(world.store.apply_task_patch(&patch), "patch target not on the board");
    Ok(())
}

#[when(r#"the comment "{body}" is added to task "{id}""#)]
fn add_comment(world: &mut BoardWorld, body: String, id: String) {
    let pending = world.store.add_comment(&TaskId::new(id), body);
    world.last_outcome = Some(run_async(pending.settled()));
}
