//! Dense cell grid storing the classification of every maze cell.

use cookieman_core::{Cell, CellType, ConfigError, Direction, GridError};

/// Classification stored for a single grid cell.
///
/// The cell position duplicates the storage index so callers iterating the
/// grid can identify cells without recomputing coordinates. It is assigned at
/// construction and never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellMetadata {
    cell: Cell,
    cell_type: CellType,
}

impl CellMetadata {
    /// Position of the cell within the grid.
    #[must_use]
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Classification currently assigned to the cell.
    #[must_use]
    pub const fn cell_type(&self) -> CellType {
        self.cell_type
    }
}

/// Fixed-size grid of cells stored in row-major order.
///
/// Cells live in a flat buffer indexed by `y * width + x`, with row `0` at the
/// bottom of the maze. The dimensions never change after construction; a new
/// grid must be built to resize.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellMetadata>,
}

impl Grid {
    /// Creates a grid where every cell starts out as [`CellType::Empty`].
    ///
    /// Fails when the dimensions cannot be addressed with signed cell
    /// coordinates.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        let too_large = ConfigError::DimensionsTooLarge { width, height };
        let columns = i32::try_from(width).map_err(|_| too_large)?;
        let rows = i32::try_from(height).map_err(|_| too_large)?;
        let cell_count = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(width, height)| width.checked_mul(height))
            .ok_or(too_large)?;

        let mut cells = Vec::with_capacity(cell_count);
        for y in 0..rows {
            for x in 0..columns {
                cells.push(CellMetadata {
                    cell: Cell::new(x, y),
                    cell_type: CellType::Empty,
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Provides the dimensions of the grid as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reports whether `0 <= x < width` and `0 <= y < height`.
    #[must_use]
    pub fn is_valid_cell(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Cell adjacent to `cell` in the provided direction.
    ///
    /// Fails with [`GridError::InvalidDirection`] for [`Direction::Invalid`]
    /// and with [`GridError::OutOfBounds`] when the neighbor lies outside the
    /// grid.
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Result<Cell, GridError> {
        if !direction.is_cardinal() {
            return Err(GridError::InvalidDirection);
        }

        let neighbor = cell
            .offset(direction)
            .ok_or(GridError::OutOfBounds { cell })?;
        if !self.is_valid_cell(neighbor) {
            return Err(GridError::OutOfBounds { cell: neighbor });
        }

        Ok(neighbor)
    }

    /// Classification of the provided cell.
    pub fn cell_type(&self, cell: Cell) -> Result<CellType, GridError> {
        self.metadata(cell).map(CellMetadata::cell_type)
    }

    /// Metadata stored for the provided cell.
    pub fn metadata(&self, cell: Cell) -> Result<&CellMetadata, GridError> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .ok_or(GridError::OutOfBounds { cell })
    }

    /// Stores a new classification for the cell, returning the previous one.
    pub fn set_cell_type(
        &mut self,
        cell: Cell,
        cell_type: CellType,
    ) -> Result<CellType, GridError> {
        let slot = self
            .index(cell)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(GridError::OutOfBounds { cell })?;
        let previous = slot.cell_type;
        slot.cell_type = cell_type;
        Ok(previous)
    }

    /// Iterates every cell together with its metadata in row-major order.
    ///
    /// The iterator is `Clone`, so a full-grid scan can be restarted without
    /// touching the grid again.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &CellMetadata)> + Clone + '_ {
        self.cells.iter().map(|metadata| (metadata.cell, metadata))
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let x = u32::try_from(cell.x()).ok()?;
        let y = u32::try_from(cell.y()).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let column = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}
