//! Game of Life core functionality

pub mod grid;
pub mod rules;
pub mod io;
pub mod simulator;
pub mod trigger;

pub use grid::Grid;
pub use rules::GameOfLifeRules;
pub use io::{load_grid_from_file, save_grid_to_file, create_example_patterns};
pub use simulator::{GridSimulator, RunState, TickOutcome, DEFAULT_TICK_INTERVAL};
pub use trigger::{IntervalTrigger, ManualTrigger, PeriodicTrigger};
