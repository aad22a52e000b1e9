//! Square grid of cell states

use crate::error::{Result, SimError};
use itertools::iproduct;

/// Moore neighbourhood offsets as (row, col) deltas.
pub const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// The rule never distinguishes counts above this value.
pub const NEIGHBOUR_SATURATION: u8 = 4;

/// Largest board side accepted from configuration or the command line.
pub const MAX_SIDE: usize = 4096;

/// A fixed-size SIDE x SIDE Game of Life grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new all-dead grid
    ///
    /// # Panics
    ///
    /// Panics if `side` exceeds [`MAX_SIDE`]; use [`Grid::try_new`] for unchecked input.
    pub fn new(side: usize) -> Self {
        match Self::try_new(side) {
            Ok(grid) => grid,
            Err(err) => panic!("{}", err),
        }
    }

    /// Create a new all-dead grid, rejecting sides above [`MAX_SIDE`]
    pub fn try_new(side: usize) -> Result<Self> {
        let len = side
            .checked_mul(side)
            .filter(|_| side <= MAX_SIDE)
            .ok_or(SimError::SideTooLarge { side, max: MAX_SIDE })?;

        Ok(Self {
            side,
            cells: vec![false; len],
        })
    }

    /// Create a grid from rows of cell states. Rows must form a square.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> anyhow::Result<Self> {
        let side = rows.len();
        if side == 0 {
            anyhow::bail!("Grid cannot be empty");
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != side {
                anyhow::bail!("Row {} has length {}, expected {} (grid must be square)", i, row.len(), side);
            }
        }

        Ok(Self {
            side,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub(crate) fn from_flat(side: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), side * side);
        Self { side, cells }
    }

    /// Side length
    pub fn side(&self) -> usize {
        self.side
    }

    /// Flat row-major view of the cells
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.side + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.side || col >= self.side {
            return Err(SimError::OutOfRange { row, col, side: self.side });
        }
        Ok(())
    }

    /// Get cell value at coordinates. Out of bounds cells read as dead.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.side && col < self.side && self.cells[self.index(row, col)]
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Count living neighbours of a cell, stopping once the count saturates.
    ///
    /// Neighbours outside the grid are dead; the grid never wraps.
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;

        for (dr, dc) in NEIGHBOUR_OFFSETS {
            if self.is_neighbor_alive(row as isize + dr, col as isize + dc) {
                count += 1;
                if count == NEIGHBOUR_SATURATION {
                    break;
                }
            }
        }

        count
    }

    fn is_neighbor_alive(&self, row: isize, col: isize) -> bool {
        let side = self.side as isize;
        if row < 0 || col < 0 || row >= side || col >= side {
            return false;
        }
        self.cells[self.index(row as usize, col as usize)]
    }

    /// Get all living cell coordinates as (row, col)
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.side, 0..self.side)
            .filter(|&(row, col)| self.get(row, col))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Rows as nested vectors, `rows[y][x]`
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.side.max(1)).map(<[bool]>::to_vec).collect()
    }

    /// Place a smaller pattern in the middle of an empty grid of `side`
    pub fn embed_centered(&self, side: usize) -> anyhow::Result<Grid> {
        if self.side > side {
            anyhow::bail!("Pattern of side {} does not fit on a {}x{} grid", self.side, side, side);
        }

        let offset = (side - self.side) / 2;
        let mut grid = Grid::try_new(side)?;
        for (row, col) in self.living_cells() {
            grid.set(row + offset, col + offset, true)?;
        }
        Ok(grid)
    }
}
