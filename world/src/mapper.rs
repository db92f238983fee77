//! Conversions between world space and grid space.

use cookieman_core::{Cell, ConfigError, Direction, GridError};
use glam::Vec2;

use crate::grid::Grid;

/// Bidirectional transform between world positions and grid cells.
///
/// Cell `(0, 0)` has its lower-left corner at `origin`, and every cell is a
/// square of `cell_size` world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    origin: Vec2,
    cell_size: f32,
}

impl CoordinateMapper {
    /// Creates a mapper anchored at `origin`.
    ///
    /// Fails unless `cell_size` is positive and finite.
    pub fn new(origin: Vec2, cell_size: f32) -> Result<Self, ConfigError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(ConfigError::NonPositiveCellSize(cell_size));
        }

        Ok(Self { origin, cell_size })
    }

    /// World position of the lower-left corner of cell `(0, 0)`.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Side length of a cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing the world position.
    ///
    /// Each axis is floored independently, so positions just below or left of
    /// the origin land in row or column `-1` and are rejected with
    /// [`GridError::InvalidCell`] like every other position outside `grid`.
    pub fn world_to_cell(&self, grid: &Grid, position: Vec2) -> Result<Cell, GridError> {
        let invalid = GridError::InvalidCell {
            x: position.x,
            y: position.y,
        };

        let cell = self.containing_cell(position).ok_or(invalid)?;
        if grid.is_valid_cell(cell) {
            Ok(cell)
        } else {
            Err(invalid)
        }
    }

    /// World position of the lower-left corner of the cell.
    #[must_use]
    pub fn cell_to_world(&self, cell: Cell) -> Vec2 {
        Vec2::new(cell.x() as f32, cell.y() as f32) * self.cell_size + self.origin
    }

    /// World position of the center of the cell.
    #[must_use]
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        self.cell_to_world(cell) + Vec2::splat(self.cell_size / 2.0)
    }

    /// Classifies an input vector by exact comparison with the unit axes.
    ///
    /// No normalisation is applied: `(0, 2)` or a diagonal yields
    /// [`Direction::Invalid`], as does the zero vector.
    #[must_use]
    pub fn direction_from_vector(vector: Vec2) -> Direction {
        Direction::CARDINALS
            .into_iter()
            .find(|direction| direction.unit_vector() == Some(vector))
            .unwrap_or(Direction::Invalid)
    }

    /// Reports whether `position` reached or passed the center of its cell
    /// while travelling in `direction`.
    ///
    /// The position is compared against [`Self::cell_center`] of the cell
    /// containing it, with `>=` for [`Direction::Up`] and [`Direction::Right`]
    /// and with `<=` for [`Direction::Down`] and [`Direction::Left`]. Grid
    /// bounds are not consulted. [`Direction::Invalid`] never reaches a center.
    #[must_use]
    pub fn has_reached_cell_center_in_direction(
        &self,
        direction: Direction,
        position: Vec2,
    ) -> bool {
        let Some(cell) = self.containing_cell(position) else {
            return false;
        };
        let center = self.cell_center(cell);

        match direction {
            Direction::Up => position.y >= center.y,
            Direction::Right => position.x >= center.x,
            Direction::Down => position.y <= center.y,
            Direction::Left => position.x <= center.x,
            Direction::Invalid => false,
        }
    }

    /// Cell whose square contains `position`, ignoring grid bounds.
    fn containing_cell(&self, position: Vec2) -> Option<Cell> {
        let scaled = ((position - self.origin) / self.cell_size).floor();
        to_coordinate(scaled.x)
            .zip(to_coordinate(scaled.y))
            .map(|(x, y)| Cell::new(x, y))
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            cell_size: 1.0,
        }
    }
}

fn to_coordinate(value: f32) -> Option<i32> {
    if value.is_finite() && value >= i32::MIN as f32 && value < i32::MAX as f32 {
        Some(value as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: u32, height: u32) -> Grid {
        Grid::new(width, height).expect("grid")
    }

    #[test]
    fn rejects_non_positive_cell_sizes() {
        for size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(CoordinateMapper::new(Vec2::ZERO, size).is_err(), "{size}");
        }
    }

    #[test]
    fn floors_each_axis_independently() {
        let grid = grid(4, 4);
        let mapper = CoordinateMapper::new(Vec2::new(-2.0, -2.0), 1.0).expect("mapper");

        assert_eq!(
            mapper.world_to_cell(&grid, Vec2::new(-1.5, -0.25)),
            Ok(Cell::new(0, 1))
        );
        assert_eq!(
            mapper.world_to_cell(&grid, Vec2::new(1.999, -2.0)),
            Ok(Cell::new(3, 0))
        );
        // Truncation would put x = -2.5 in column 0.
        assert_eq!(
            mapper.world_to_cell(&grid, Vec2::new(-2.5, 0.5)),
            Err(GridError::InvalidCell { x: -2.5, y: 0.5 })
        );
    }

    #[test]
    fn positions_outside_the_grid_are_invalid() {
        let grid = grid(3, 3);
        let mapper = CoordinateMapper::default();

        assert!(mapper.world_to_cell(&grid, Vec2::new(3.0, 0.5)).is_err());
        assert!(mapper.world_to_cell(&grid, Vec2::new(0.5, 3.0)).is_err());
        assert!(mapper.world_to_cell(&grid, Vec2::new(2.99, 2.99)).is_ok());
        assert!(matches!(
            mapper.world_to_cell(&grid, Vec2::new(f32::NAN, 0.5)),
            Err(GridError::InvalidCell { .. })
        ));
    }

    #[test]
    fn cell_to_world_scales_and_offsets() {
        let mapper = CoordinateMapper::new(Vec2::new(10.0, -4.0), 2.0).expect("mapper");

        assert_eq!(mapper.cell_to_world(Cell::new(0, 0)), Vec2::new(10.0, -4.0));
        assert_eq!(mapper.cell_to_world(Cell::new(3, 1)), Vec2::new(16.0, -2.0));
        assert_eq!(mapper.cell_center(Cell::new(3, 1)), Vec2::new(17.0, -1.0));
    }

    #[test]
    fn snapping_to_a_cell_is_idempotent() {
        let grid = grid(6, 5);
        for (origin, cell_size) in [
            (Vec2::ZERO, 1.0),
            (Vec2::new(-3.0, 2.0), 0.5),
            (Vec2::new(8.0, -6.0), 2.0),
        ] {
            let mapper = CoordinateMapper::new(origin, cell_size).expect("mapper");
            for (cell, _) in grid.cells() {
                let corner = mapper.cell_to_world(cell);
                let snapped = mapper.world_to_cell(&grid, corner).expect("valid cell");
                assert_eq!(mapper.cell_to_world(snapped), corner);
                assert_eq!(
                    mapper.world_to_cell(&grid, mapper.cell_center(cell)),
                    Ok(cell)
                );
            }
        }
    }

    #[test]
    fn classifies_only_exact_unit_axes() {
        let cases = [
            (Vec2::new(0.0, 1.0), Direction::Up),
            (Vec2::new(0.0, -1.0), Direction::Down),
            (Vec2::new(-1.0, 0.0), Direction::Left),
            (Vec2::new(1.0, 0.0), Direction::Right),
            (Vec2::ZERO, Direction::Invalid),
            (Vec2::new(1.0, 1.0), Direction::Invalid),
            (Vec2::new(-1.0, 1.0), Direction::Invalid),
            (Vec2::new(0.0, 2.0), Direction::Invalid),
            (Vec2::new(0.999, 0.0), Direction::Invalid),
            (Vec2::new(f32::NAN, 0.0), Direction::Invalid),
        ];

        for (vector, expected) in cases {
            assert_eq!(
                CoordinateMapper::direction_from_vector(vector),
                expected,
                "{vector:?}"
            );
        }
    }

    #[test]
    fn center_test_is_directional() {
        let mapper = CoordinateMapper::default();
        let before_center = Vec2::new(1.25, 1.25);
        let at_center = Vec2::new(1.5, 1.5);
        let past_center = Vec2::new(1.75, 1.75);

        assert!(!mapper.has_reached_cell_center_in_direction(Direction::Right, before_center));
        assert!(mapper.has_reached_cell_center_in_direction(Direction::Right, at_center));
        assert!(mapper.has_reached_cell_center_in_direction(Direction::Right, past_center));

        assert!(!mapper.has_reached_cell_center_in_direction(Direction::Up, before_center));
        assert!(mapper.has_reached_cell_center_in_direction(Direction::Up, at_center));

        assert!(mapper.has_reached_cell_center_in_direction(Direction::Left, before_center));
        assert!(mapper.has_reached_cell_center_in_direction(Direction::Left, at_center));
        assert!(!mapper.has_reached_cell_center_in_direction(Direction::Left, past_center));

        assert!(mapper.has_reached_cell_center_in_direction(Direction::Down, at_center));
        assert!(!mapper.has_reached_cell_center_in_direction(Direction::Down, past_center));

        assert!(!mapper.has_reached_cell_center_in_direction(Direction::Invalid, at_center));
    }

    #[test]
    fn every_cell_center_counts_as_reached() {
        let grid = grid(10, 10);
        for (origin, cell_size) in [
            (Vec2::ZERO, 0.1),
            (Vec2::ZERO, 0.3),
            (Vec2::new(-2.0, 1.5), 0.7),
        ] {
            let mapper = CoordinateMapper::new(origin, cell_size).expect("mapper");
            for (cell, _) in grid.cells() {
                let center = mapper.cell_center(cell);
                for direction in Direction::CARDINALS {
                    assert!(
                        mapper.has_reached_cell_center_in_direction(direction, center),
                        "size {cell_size}: {cell} {direction:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn center_test_respects_origin_and_cell_size() {
        let mapper = CoordinateMapper::new(Vec2::new(-1.0, 0.5), 2.0).expect("mapper");

        let reached = |direction, x, y| {
            mapper.has_reached_cell_center_in_direction(direction, Vec2::new(x, y))
        };

        // Cell (1, 0) spans x in [1, 3) with its center at x = 2.
        assert!(!reached(Direction::Right, 1.5, 1.0));
        assert!(reached(Direction::Right, 2.0, 1.0));
        assert!(reached(Direction::Left, 1.5, 1.0));
        // Cell row 0 spans y in [0.5, 2.5) with its center at y = 1.5.
        assert!(reached(Direction::Up, 0.0, 1.5));
        assert!(!reached(Direction::Up, 0.0, 1.0));
    }
}
