//! Configuration management for the grid simulator

pub mod settings;

pub use settings::{
    Settings, GridConfig, TimerConfig, DisplayConfig, OutputFormat, CliOverrides
};
