//! Game of Life transition rule

use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Compute the next generation from `current`.
    ///
    /// Every successor cell is derived from the unmodified current grid, so no
    /// cell ever observes a partially updated neighbourhood.
    pub fn evolve(current: &Grid) -> Grid {
        let side = current.side();

        let next_cells: Vec<bool> = (0..side)
            .into_par_iter()
            .flat_map(|row| {
                (0..side).into_par_iter().map(move |col| {
                    Self::should_be_alive(current.get(row, col), current.count_neighbors(row, col))
                })
            })
            .collect();

        Grid::from_flat(side, next_cells)
    }

    /// Next state of a cell given its current state and living neighbour count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}
