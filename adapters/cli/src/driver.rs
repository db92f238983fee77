//! Headless tick loop that drives a single actor through a scenario.

use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use cookieman_core::{Cell, CellType, Command, Event};
use cookieman_system_movement::MovementController;
use cookieman_world::{self as world, query, Maze};
use glam::Vec2;
use log::{debug, info};

use crate::scenario::Scenario;

/// Final state of the simulated actor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RunOutcome {
    /// Cell containing the actor after the last tick.
    pub(crate) cell: Cell,
    /// World position of the actor after the last tick.
    pub(crate) position: Vec2,
}

/// Builds the maze described by the scenario and classifies it from its rows.
pub(crate) fn build_maze(scenario: &Scenario) -> Result<Maze> {
    let (width, height) = scenario.dimensions()?;
    let mut maze = Maze::new();
    let mut events = Vec::new();

    world::apply(
        &mut maze,
        Command::ConfigureGrid {
            width,
            height,
            origin: scenario.origin(),
            cell_size: scenario.cell_size,
        },
        &mut events,
    );
    if let Some(Event::GridRejected { reason }) = events.first() {
        bail!("invalid grid configuration: {reason}");
    }

    world::classify(&mut maze, |corner| scenario.tile_at(corner), &mut events);
    info!(
        "built {width}x{height} maze with {} walkable cells",
        query::grid(&maze)
            .cells()
            .filter(|(_, metadata)| metadata.cell_type().is_walkable())
            .count()
    );
    Ok(maze)
}

/// Runs the scripted inputs against the maze for `ticks` ticks.
pub(crate) fn run(scenario: &Scenario, maze: &Maze, ticks: u32) -> Result<RunOutcome> {
    ensure!(
        query::is_valid_cell(maze, scenario.start),
        "start cell {} lies outside the grid",
        scenario.start
    );

    let start = query::cell_center(maze, scenario.start);
    let mut controller =
        MovementController::new(start, scenario.speed).context("invalid actor configuration")?;
    let dt = Duration::from_millis(scenario.tick_millis);
    let mut events = Vec::new();

    for tick in 0..ticks {
        for input in scenario.inputs.iter().filter(|input| input.tick == tick) {
            controller.handle_input(input.to_move_input(), &mut events);
        }
        for event in events.drain(..) {
            info!("tick {tick}: {event:?}");
        }

        let position = controller.tick(maze, dt);
        debug!("tick {tick}: {position} heading {:?}", controller.heading());
    }

    let position = controller.position();
    let cell = query::world_to_cell(maze, position).context("actor left the grid")?;
    Ok(RunOutcome { cell, position })
}

/// Renders the classified grid top row first, one character per cell.
#[must_use]
pub(crate) fn render_grid(maze: &Maze) -> String {
    let grid = query::grid(maze);
    let (width, height) = grid.dimensions();
    let mut rows = vec![String::with_capacity(width as usize); height as usize];

    for (cell, metadata) in grid.cells() {
        let symbol = match metadata.cell_type() {
            CellType::Wall => '#',
            CellType::Path => '.',
            CellType::Empty => ' ',
        };
        if let Some(row) = usize::try_from(cell.y()).ok().and_then(|y| rows.get_mut(y)) {
            row.push(symbol);
        }
    }

    rows.iter().rev().map(|row| format!("{row}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORNER: &str = r######"
speed = 4.0
tick_millis = 125
ticks = 16
start = { x = 1, y = 1 }
rows = ["#####", "#...#", "#.#.#", "#...#", "#####"]

[[inputs]]
tick = 0
phase = "started"

[[inputs]]
tick = 0
phase = "performed"
axis = [1.0, 0.0]

[[inputs]]
tick = 3
phase = "performed"
axis = [0.0, 1.0]

[[inputs]]
tick = 9
phase = "performed"
axis = [-1.0, 0.0]
"######;

    #[test]
    fn corner_route_ends_in_the_top_left_corridor() {
        let scenario = Scenario::parse(CORNER).expect("scenario parses");
        let maze = build_maze(&scenario).expect("maze builds");

        let outcome = run(&scenario, &maze, scenario.ticks).expect("run completes");

        assert_eq!(outcome.cell, Cell::new(1, 3));
        assert_eq!(outcome.position, Vec2::new(1.5, 3.5));
    }

    #[test]
    fn stopping_early_leaves_actor_mid_route() {
        let scenario = Scenario::parse(CORNER).expect("scenario parses");
        let maze = build_maze(&scenario).expect("maze builds");

        let outcome = run(&scenario, &maze, 4).expect("run completes");

        assert_eq!(outcome.cell, Cell::new(3, 1));
        assert_eq!(outcome.position, Vec2::new(3.5, 1.5));
    }

    #[test]
    fn render_grid_matches_layout_rows() {
        let scenario = Scenario::parse(
            r######"
start = { x = 0, y = 0 }
rows = ["#. ", "..#"]
"######,
        )
        .expect("scenario parses");
        let maze = build_maze(&scenario).expect("maze builds");

        assert_eq!(render_grid(&maze), "#. \n..#\n");
    }

    #[test]
    fn rejects_start_outside_grid() {
        let scenario = Scenario::parse(
            r######"
start = { x = 5, y = 0 }
rows = ["..."]
"######,
        )
        .expect("scenario parses");
        let maze = build_maze(&scenario).expect("maze builds");

        assert!(run(&scenario, &maze, 1).is_err());
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        let scenario = Scenario::parse(
            r######"
cell_size = 0.0
start = { x = 0, y = 0 }
rows = ["."]
"######,
        )
        .expect("scenario parses");

        let error = build_maze(&scenario).expect_err("configuration rejected");
        assert!(error.to_string().contains("cell size"), "{error}");
    }
}
