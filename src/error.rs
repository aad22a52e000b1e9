//! Error types for the grid simulator.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("coordinates ({row}, {col}) out of range for {side}x{side} grid")]
    OutOfRange { row: usize, col: usize, side: usize },

    #[error("cells cannot be edited while the simulation is running")]
    Running,

    #[error("grid side {side} exceeds the maximum of {max}")]
    SideTooLarge { side: usize, max: usize },

    #[error("grid side mismatch: expected {expected}, got {actual}")]
    SideMismatch { expected: usize, actual: usize },
}
