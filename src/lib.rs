//! Game of Life Grid Simulator
//!
//! This library provides a fixed-size Game of Life board with a run/idle
//! state machine, driven by an external periodic trigger.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use error::SimError;
pub use game_of_life::{Grid, GridSimulator, RunState, TickOutcome};

/// Evolve a seed for a fixed number of generations, returning every generation
/// including the seed. Stops early if the board dies out.
pub fn evolve_history(seed: Grid, generations: usize) -> Vec<Grid> {
    let mut history = Vec::new();
    let mut current = seed;
    for _ in 0..generations {
        let next = game_of_life::GameOfLifeRules::evolve(&current);
        let extinct = next.is_empty();
        history.push(std::mem::replace(&mut current, next));
        if extinct {
            break;
        }
    }
    history.push(current);
    history
}
