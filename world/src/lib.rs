#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state for the CookieMan navigation engine.
//!
//! A [`Maze`] owns exactly one [`Grid`] together with the [`CoordinateMapper`]
//! that projects it into world space. The pair is only ever replaced as a
//! unit through [`apply`], so the grid dimensions and the world origin can
//! never drift apart. Actors read the maze through the [`query`] module.

pub mod grid;
pub mod mapper;

use cookieman_core::{Cell, CellType, Command, ConfigError, Event, TileKind};
use glam::Vec2;
use log::{debug, warn};

pub use grid::{CellMetadata, Grid};
pub use mapper::CoordinateMapper;

/// Grid and coordinate mapper that together describe the playable maze.
#[derive(Clone, Debug, Default)]
pub struct Maze {
    grid: Grid,
    mapper: CoordinateMapper,
}

impl Maze {
    /// Creates an empty maze with no cells and a unit mapper at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a maze whose cells all start out as [`CellType::Empty`].
    pub fn configured(
        width: u32,
        height: u32,
        origin: Vec2,
        cell_size: f32,
    ) -> Result<Self, ConfigError> {
        let mapper = CoordinateMapper::new(origin, cell_size)?;
        let grid = Grid::new(width, height)?;
        Ok(Self { grid, mapper })
    }
}

/// Applies the provided command to the maze, reporting the outcome as events.
pub fn apply(maze: &mut Maze, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid {
            width,
            height,
            origin,
            cell_size,
        } => match Maze::configured(width, height, origin, cell_size) {
            Ok(configured) => {
                *maze = configured;
                debug!("configured {width}x{height} grid at {origin} with cell size {cell_size}");
                out_events.push(Event::GridConfigured { width, height });
            }
            Err(reason) => {
                warn!("rejected grid configuration: {reason}");
                out_events.push(Event::GridRejected { reason });
            }
        },
        Command::SetCellType { cell, cell_type } => {
            match maze.grid.set_cell_type(cell, cell_type) {
                Ok(previous) if previous != cell_type => {
                    out_events.push(Event::CellTypeChanged {
                        cell,
                        from: previous,
                        to: cell_type,
                    });
                }
                Ok(_) => {}
                Err(reason) => out_events.push(Event::CellTypeRejected { cell, reason }),
            }
        }
    }
}

/// Classifies every cell of the maze using an external tile lookup.
///
/// The lookup receives the world position of each cell's lower-left corner.
/// `Some(kind)` stores the matching [`CellType`]; `None` resets the cell to
/// [`CellType::Empty`], so classifying again yields the same grid as a fresh
/// rebuild.
pub fn classify<F>(maze: &mut Maze, mut lookup: F, out_events: &mut Vec<Event>)
where
    F: FnMut(Vec2) -> Option<TileKind>,
{
    let requests: Vec<(Cell, CellType)> = maze
        .grid
        .cells()
        .map(|(cell, _)| {
            let cell_type =
                lookup(maze.mapper.cell_to_world(cell)).map_or(CellType::Empty, CellType::from);
            (cell, cell_type)
        })
        .collect();

    let before = out_events.len();
    for (cell, cell_type) in requests {
        apply(maze, Command::SetCellType { cell, cell_type }, out_events);
    }
    debug!(
        "classified {} cells, {} changed",
        maze.grid.cells().count(),
        out_events.len() - before
    );
}

/// Query functions that provide read-only access to the maze.
///
/// The geometry here is strict: every failure is reported to the caller.
/// [`query::is_neighbor_walkable`] is the one exception and folds failures
/// into `false`.
pub mod query {
    use cookieman_core::{Cell, Direction, GridError};
    use glam::Vec2;
    use log::trace;

    use super::{CoordinateMapper, Grid, Maze};

    /// Provides read-only access to the maze grid.
    #[must_use]
    pub fn grid(maze: &Maze) -> &Grid {
        &maze.grid
    }

    /// Provides read-only access to the maze coordinate mapper.
    #[must_use]
    pub fn mapper(maze: &Maze) -> &CoordinateMapper {
        &maze.mapper
    }

    /// Reports whether the cell lies within the maze grid.
    #[must_use]
    pub fn is_valid_cell(maze: &Maze, cell: Cell) -> bool {
        maze.grid.is_valid_cell(cell)
    }

    /// Cell adjacent to `cell` in the provided direction.
    pub fn neighbor(maze: &Maze, cell: Cell, direction: Direction) -> Result<Cell, GridError> {
        maze.grid.neighbor(cell, direction)
    }

    /// Cell containing the world position.
    pub fn world_to_cell(maze: &Maze, position: Vec2) -> Result<Cell, GridError> {
        maze.mapper.world_to_cell(&maze.grid, position)
    }

    /// World position of the lower-left corner of the cell.
    #[must_use]
    pub fn cell_to_world(maze: &Maze, cell: Cell) -> Vec2 {
        maze.mapper.cell_to_world(cell)
    }

    /// World position of the center of the cell.
    #[must_use]
    pub fn cell_center(maze: &Maze, cell: Cell) -> Vec2 {
        maze.mapper.cell_center(cell)
    }

    /// Classifies an input vector by exact comparison with the unit axes.
    #[must_use]
    pub fn direction_from_vector(vector: Vec2) -> Direction {
        CoordinateMapper::direction_from_vector(vector)
    }

    /// Reports whether `position` reached or passed its cell center while
    /// travelling in `direction`.
    #[must_use]
    pub fn has_reached_cell_center_in_direction(
        maze: &Maze,
        direction: Direction,
        position: Vec2,
    ) -> bool {
        maze.mapper
            .has_reached_cell_center_in_direction(direction, position)
    }

    /// Center of the cell containing `position`.
    pub fn current_cell_center(maze: &Maze, position: Vec2) -> Result<Vec2, GridError> {
        world_to_cell(maze, position).map(|cell| maze.mapper.cell_center(cell))
    }

    /// Cell adjacent to the one containing `position`.
    pub fn neighbor_cell(
        maze: &Maze,
        position: Vec2,
        direction: Direction,
    ) -> Result<Cell, GridError> {
        let cell = world_to_cell(maze, position)?;
        maze.grid.neighbor(cell, direction)
    }

    /// Center of the cell adjacent to the one containing `position`.
    pub fn neighbor_center(
        maze: &Maze,
        position: Vec2,
        direction: Direction,
    ) -> Result<Vec2, GridError> {
        neighbor_cell(maze, position, direction).map(|cell| maze.mapper.cell_center(cell))
    }

    /// Reports whether an actor at `position` may step into the adjacent cell.
    ///
    /// Any geometry failure on the way counts as not walkable.
    #[must_use]
    pub fn is_neighbor_walkable(maze: &Maze, position: Vec2, direction: Direction) -> bool {
        match neighbor_cell(maze, position, direction).and_then(|cell| maze.grid.cell_type(cell)) {
            Ok(cell_type) => cell_type.is_walkable(),
            Err(error) => {
                trace!("neighbor {direction:?} of {position} is not walkable: {error}");
                false
            }
        }
    }
}
