//! Given steps for board BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::{
    domain::{Task, TaskId},
    ports::GatewayError,
};

#[given("a board backed by an empty service")]
fn empty_board(world: &mut BoardWorld) {
    *world = BoardWorld::new();
}

#[given(r#"a board backed by a service holding task "{id}" titled "{title}" in "{status}""#)]
fn board_with_task(
    world: &mut BoardWorld,
    id: String,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    *world = BoardWorld::new();
    world.gateway.seed([Task::new(TaskId::new(id), title, status)]);
    run_async(world.store.fetch_and_set_tasks()).wrap_err("hydrate scenario board")?;
    Ok(())
}

#[given("the service rejects the next request")]
fn service_rejects_next(world: &mut BoardWorld) {
    world
        .gateway
        .fail_next(GatewayError::Rejected("scenario rejection".to_owned()));
}
