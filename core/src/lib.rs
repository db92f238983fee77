#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the CookieMan navigation engine.
//!
//! This crate defines the value types and the message surface that connect the
//! maze world, the per-actor movement systems, and adapters. Adapters submit
//! [`Command`] values describing desired grid mutations, the world executes
//! them through its `apply` entry point, and reports the outcome as [`Event`]
//! values. Geometry failures are surfaced as [`GridError`] values instead of
//! panics because bumping into a wall is routine gameplay.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as signed column and row indices.
///
/// The grid uses a Y-up convention: increasing `y` moves toward [`Direction::Up`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Cell one step away in the provided direction.
    ///
    /// Returns `None` for [`Direction::Invalid`] or when the step would
    /// overflow the coordinate range. Bounds are not checked here.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset()?;
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Discrete movement directions recognised by the grid.
///
/// [`Direction::Invalid`] is a value, not an error: it is what classifying a
/// non-axis vector produces, and callers must check for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    Up,
    /// Movement toward decreasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// Anything that is not one of the four unit axes.
    Invalid,
}

impl Direction {
    /// The four usable directions in a stable order.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Single-step cell offset `(dx, dy)` for the direction.
    #[must_use]
    pub const fn offset(self) -> Option<(i32, i32)> {
        match self {
            Self::Up => Some((0, 1)),
            Self::Down => Some((0, -1)),
            Self::Left => Some((-1, 0)),
            Self::Right => Some((1, 0)),
            Self::Invalid => None,
        }
    }

    /// Direction pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Invalid => Self::Invalid,
        }
    }

    /// Reports whether the direction is one of the four unit axes.
    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Unit vector in world space, `None` for [`Direction::Invalid`].
    #[must_use]
    pub fn unit_vector(self) -> Option<Vec2> {
        self.offset().map(|(dx, dy)| Vec2::new(dx as f32, dy as f32))
    }
}

/// Classification stored for every grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// No tile was found for the cell.
    #[default]
    Empty,
    /// Blocking tile.
    Wall,
    /// Tile actors may walk on.
    Path,
}

impl CellType {
    /// Reports whether actors may enter a cell of this type.
    ///
    /// Only [`CellType::Path`] is walkable; empty cells block movement.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Path)
    }
}

/// Tile kinds reported by the external tile classification feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Wall tile.
    Wall,
    /// Path tile.
    Path,
}

impl From<TileKind> for CellType {
    fn from(kind: TileKind) -> Self {
        match kind {
            TileKind::Wall => Self::Wall,
            TileKind::Path => Self::Path,
        }
    }
}

/// Recoverable geometry failures reported by the grid and coordinate mapper.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GridError {
    /// The direction was [`Direction::Invalid`] or a non-axis vector.
    #[error("direction is not one of the four unit axes")]
    InvalidDirection,
    /// The cell lies outside the grid extent.
    #[error("cell {cell} lies outside the grid")]
    OutOfBounds {
        /// Offending cell.
        cell: Cell,
    },
    /// The world position maps to a cell outside the grid.
    #[error("world position ({x}, {y}) maps outside the grid")]
    InvalidCell {
        /// World-space x coordinate that was queried.
        x: f32,
        /// World-space y coordinate that was queried.
        y: f32,
    },
}

/// Rejected construction parameters.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Cell size must be a positive, finite number of world units.
    #[error("cell size must be positive and finite, got {0}")]
    NonPositiveCellSize(f32),
    /// Grid dimensions do not fit signed cell coordinates.
    #[error("grid dimensions {width}x{height} exceed the addressable cell range")]
    DimensionsTooLarge {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// Movement speed must be finite and not negative.
    #[error("movement speed must be finite and not negative, got {0}")]
    InvalidSpeed(f32),
}

/// Commands that express all permissible maze mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the grid and its coordinate mapper as a pair.
    ///
    /// Every cell of the new grid starts out as [`CellType::Empty`].
    ConfigureGrid {
        /// Number of columns in the grid.
        width: u32,
        /// Number of rows in the grid.
        height: u32,
        /// World position of the lower-left corner of cell `(0, 0)`.
        origin: Vec2,
        /// Side length of a square cell in world units.
        cell_size: f32,
    },
    /// Updates the classification of a single cell.
    SetCellType {
        /// Cell to classify.
        cell: Cell,
        /// Classification to store.
        cell_type: CellType,
    },
}

/// Events reported by the maze after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A fresh grid and mapper pair replaced the previous one.
    GridConfigured {
        /// Number of columns in the grid.
        width: u32,
        /// Number of rows in the grid.
        height: u32,
    },
    /// A grid configuration request was rejected; the previous grid remains.
    GridRejected {
        /// Reason the configuration failed.
        reason: ConfigError,
    },
    /// A cell changed classification.
    CellTypeChanged {
        /// Cell whose classification changed.
        cell: Cell,
        /// Classification before the change.
        from: CellType,
        /// Classification after the change.
        to: CellType,
    },
    /// A classification request addressed a cell outside the grid.
    CellTypeRejected {
        /// Cell named in the request.
        cell: Cell,
        /// Reason the request failed.
        reason: GridError,
    },
}
