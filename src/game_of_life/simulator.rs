//! Run/idle state machine around a single owned grid

use super::trigger::PeriodicTrigger;
use super::{GameOfLifeRules, Grid};
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Default period between automatic ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
}

impl RunState {
    /// Captions for the start/pause and clear/stop controls
    pub fn labels(self) -> (&'static str, &'static str) {
        match self {
            RunState::Idle => ("Start", "Clear"),
            RunState::Running => ("Pause", "Stop"),
        }
    }
}

/// Result of a single `tick` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The simulator was idle; nothing changed.
    Skipped,
    /// A new, non-empty generation is in place.
    Advanced { generation: u64, living: usize },
    /// The successor was empty; the grid was cleared and the run stopped.
    Extinct { generation: u64 },
}

/// Owns the grid and drives it through generations.
///
/// Cells are edited only while idle and advanced only while running.
pub struct GridSimulator<T: PeriodicTrigger> {
    grid: Grid,
    state: RunState,
    generation: u64,
    interval: Duration,
    trigger: T,
}

impl<T: PeriodicTrigger> GridSimulator<T> {
    pub fn new(side: usize, interval: Duration, trigger: T) -> Self {
        Self {
            grid: Grid::new(side),
            state: RunState::Idle,
            generation: 0,
            interval,
            trigger,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn side(&self) -> usize {
        self.grid.side()
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn living_count(&self) -> usize {
        self.grid.living_count()
    }

    /// Whether manual cell edits are currently accepted
    pub fn is_editable(&self) -> bool {
        self.state == RunState::Idle
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn trigger_mut(&mut self) -> &mut T {
        &mut self.trigger
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.state {
            RunState::Idle => Ok(()),
            RunState::Running => Err(SimError::Running),
        }
    }

    /// Flip one cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool> {
        self.ensure_idle()?;
        self.grid.toggle(row, col)
    }

    /// Set one cell explicitly
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        self.ensure_idle()?;
        self.grid.set(row, col, alive)
    }

    /// Replace the whole grid with a seed of the same side
    pub fn load(&mut self, grid: Grid) -> Result<()> {
        self.ensure_idle()?;
        if grid.side() != self.grid.side() {
            return Err(SimError::SideMismatch {
                expected: self.grid.side(),
                actual: grid.side(),
            });
        }
        self.grid = grid;
        Ok(())
    }

    /// Toggle between idle and running, arming or disarming the trigger
    pub fn start(&mut self) -> RunState {
        match self.state {
            RunState::Idle => {
                self.trigger.arm(self.interval);
                self.state = RunState::Running;
                debug!(interval_ms = self.interval.as_millis() as u64, "simulation started");
            }
            RunState::Running => {
                self.trigger.disarm();
                self.state = RunState::Idle;
                debug!(generation = self.generation, "simulation paused");
            }
        }
        self.state
    }

    /// Stop if running, then kill every cell
    pub fn clear(&mut self) -> RunState {
        if self.state == RunState::Running {
            self.start();
        }
        self.grid.clear();
        self.generation = 0;
        debug!("grid cleared");
        self.state
    }

    /// Advance one generation. Does nothing while idle.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != RunState::Running {
            return TickOutcome::Skipped;
        }

        let next = GameOfLifeRules::evolve(&self.grid);
        let generation = self.generation + 1;

        if next.is_empty() {
            info!(generation, "all cells dead, stopping");
            self.clear();
            return TickOutcome::Extinct { generation };
        }

        let living = next.living_count();
        self.grid = next;
        self.generation = generation;
        debug!(generation, living, "tick");
        TickOutcome::Advanced { generation, living }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::trigger::ManualTrigger;
    use proptest::prelude::*;

    fn simulator(side: usize) -> GridSimulator<ManualTrigger> {
        GridSimulator::new(side, DEFAULT_TICK_INTERVAL, ManualTrigger::default())
    }

    fn seed(sim: &mut GridSimulator<ManualTrigger>, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            sim.toggle(row, col).unwrap();
        }
    }

    #[test]
    fn test_initial_state() {
        let sim = simulator(20);
        assert_eq!(sim.run_state(), RunState::Idle);
        assert_eq!(sim.generation(), 0);
        assert!(sim.grid().is_empty());
        assert!(sim.is_editable());
        assert!(!sim.trigger().is_armed());
    }

    #[test]
    fn test_start_is_a_toggle() {
        let mut sim = simulator(20);
        seed(&mut sim, &[(3, 3), (3, 4)]);
        let before = sim.grid().clone();

        assert_eq!(sim.start(), RunState::Running);
        assert_eq!(sim.trigger().interval, Some(DEFAULT_TICK_INTERVAL));
        assert!(!sim.is_editable());

        assert_eq!(sim.start(), RunState::Idle);
        assert!(!sim.trigger().is_armed());
        assert_eq!(sim.grid(), &before);
        assert_eq!(RunState::Idle.labels(), ("Start", "Clear"));
        assert_eq!(RunState::Running.labels(), ("Pause", "Stop"));
    }

    #[test]
    fn test_toggle_rejected_while_running() {
        let mut sim = simulator(5);
        sim.start();
        assert_eq!(sim.toggle(1, 1), Err(SimError::Running));
        assert!(sim.grid().is_empty());
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut sim = simulator(5);
        assert_eq!(
            sim.toggle(2, 5),
            Err(SimError::OutOfRange { row: 2, col: 5, side: 5 })
        );
    }

    #[test]
    fn test_tick_skipped_while_idle() {
        let mut sim = simulator(10);
        seed(&mut sim, &[(5, 4), (5, 5), (5, 6)]);
        let before = sim.grid().clone();

        assert_eq!(sim.tick(), TickOutcome::Skipped);
        assert_eq!(sim.grid(), &before);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut sim = simulator(20);
        seed(&mut sim, &[(5, 4), (5, 5), (5, 6)]);
        let blinker = sim.grid().clone();

        sim.start();
        assert_eq!(sim.tick(), TickOutcome::Advanced { generation: 1, living: 3 });
        assert_ne!(sim.grid(), &blinker);
        assert_eq!(sim.tick(), TickOutcome::Advanced { generation: 2, living: 3 });
        assert_eq!(sim.grid(), &blinker);
        assert_eq!(sim.run_state(), RunState::Running);
    }

    #[test]
    fn test_empty_grid_tick_stops_run() {
        let mut sim = simulator(20);
        sim.start();

        assert_eq!(sim.tick(), TickOutcome::Extinct { generation: 1 });
        assert_eq!(sim.run_state(), RunState::Idle);
        assert!(sim.grid().is_empty());
        assert!(!sim.trigger().is_armed());
        assert_eq!(sim.trigger().disarm_count, 1);
    }

    #[test]
    fn test_lonely_cell_goes_extinct() {
        let mut sim = simulator(20);
        seed(&mut sim, &[(10, 10)]);
        sim.start();

        assert_eq!(sim.tick(), TickOutcome::Extinct { generation: 1 });
        assert_eq!(sim.run_state(), RunState::Idle);
        assert_eq!(sim.tick(), TickOutcome::Skipped);
    }

    #[test]
    fn test_clear_while_running_stops_and_resets() {
        let mut sim = simulator(20);
        seed(&mut sim, &[(5, 4), (5, 5), (5, 6)]);
        sim.start();
        sim.tick();

        assert_eq!(sim.clear(), RunState::Idle);
        assert!(sim.grid().is_empty());
        assert_eq!(sim.generation(), 0);
        assert!(!sim.trigger().is_armed());
        assert_eq!(sim.tick(), TickOutcome::Skipped);
    }

    #[test]
    fn test_clear_while_idle_keeps_trigger_untouched() {
        let mut sim = simulator(8);
        seed(&mut sim, &[(1, 1), (2, 2)]);

        assert_eq!(sim.clear(), RunState::Idle);
        assert!(sim.grid().is_empty());
        assert_eq!(sim.trigger().disarm_count, 0);
    }

    #[test]
    fn test_load_seed() {
        let mut sim = simulator(6);
        let mut grid = Grid::new(6);
        grid.set(2, 2, true).unwrap();
        sim.load(grid.clone()).unwrap();
        assert_eq!(sim.grid(), &grid);

        assert_eq!(
            sim.load(Grid::new(7)),
            Err(SimError::SideMismatch { expected: 6, actual: 7 })
        );
        sim.start();
        assert_eq!(sim.set_cell(0, 0, true), Err(SimError::Running));
    }

    proptest! {
        #[test]
        fn clear_is_idempotent(cells in proptest::collection::vec((0usize..12, 0usize..12), 0..40), running: bool) {
            let mut sim = simulator(12);
            for (row, col) in cells {
                sim.set_cell(row, col, true).unwrap();
            }
            if running {
                sim.start();
            }

            sim.clear();
            let once = sim.grid().clone();
            sim.clear();
            prop_assert_eq!(sim.grid(), &once);
            prop_assert!(once.is_empty());
            prop_assert_eq!(sim.run_state(), RunState::Idle);
        }

        #[test]
        fn double_start_is_neutral(cells in proptest::collection::vec((0usize..12, 0usize..12), 0..40)) {
            let mut sim = simulator(12);
            for (row, col) in cells {
                sim.set_cell(row, col, true).unwrap();
            }
            let before = sim.grid().clone();

            sim.start();
            sim.start();
            prop_assert_eq!(sim.grid(), &before);
            prop_assert_eq!(sim.run_state(), RunState::Idle);
        }
    }
}
