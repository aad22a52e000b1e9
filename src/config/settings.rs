//! Configuration settings for the grid simulator

use crate::game_of_life::grid::MAX_SIDE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub timer: TimerConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Side length of the square board, fixed for the whole session
    pub side: usize,
    /// Optional seed pattern, centred on the board
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub format: OutputFormat,
    pub show_coordinates: bool,
    /// Pause the run after this many generations
    pub max_generations: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                side: 20,
                pattern: None,
            },
            timer: TimerConfig {
                interval_ms: 500,
            },
            display: DisplayConfig {
                format: OutputFormat::Text,
                show_coordinates: false,
                max_generations: None,
            },
        }
    }
}

impl TimerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.side == 0 {
            anyhow::bail!("Grid side must be positive");
        }

        if self.grid.side > MAX_SIDE {
            anyhow::bail!("Grid side {} exceeds the maximum of {}", self.grid.side, MAX_SIDE);
        }

        if self.timer.interval_ms == 0 {
            anyhow::bail!("Tick interval must be positive");
        }

        if self.display.max_generations == Some(0) {
            anyhow::bail!("Maximum generations must be positive when set");
        }

        if let Some(ref pattern) = self.grid.pattern {
            if !pattern.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(side) = cli_overrides.side {
            self.grid.side = side;
        }
        if let Some(ref pattern) = cli_overrides.pattern {
            self.grid.pattern = Some(pattern.clone());
        }
        if let Some(interval_ms) = cli_overrides.interval_ms {
            self.timer.interval_ms = interval_ms;
        }
        if let Some(max_generations) = cli_overrides.max_generations {
            self.display.max_generations = Some(max_generations);
        }
        if let Some(format) = cli_overrides.format {
            self.display.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub side: Option<usize>,
    pub pattern: Option<PathBuf>,
    pub interval_ms: Option<u64>,
    pub max_generations: Option<u64>,
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid.side, 20);
        assert_eq!(settings.timer.interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.grid.side = 32;
        settings.display.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        assert_eq!(Settings::from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_parse_handwritten_yaml() {
        let yaml = "grid:\n  side: 8\ntimer:\n  interval_ms: 250\ndisplay:\n  format: json\n  show_coordinates: true\n  max_generations: 12\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.grid.side, 8);
        assert_eq!(settings.grid.pattern, None);
        assert_eq!(settings.timer.interval_ms, 250);
        assert_eq!(settings.display.format, OutputFormat::Json);
        assert_eq!(settings.display.max_generations, Some(12));
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.grid.side = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.grid.side = usize::MAX / 2;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.grid.side = MAX_SIDE;
        assert!(settings.validate().is_ok());

        let mut settings = Settings::default();
        settings.timer.interval_ms = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.display.max_generations = Some(0);
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.grid.pattern = Some(PathBuf::from("/nonexistent/seed.txt"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            side: Some(40),
            interval_ms: Some(100),
            format: Some(OutputFormat::Json),
            ..Default::default()
        });

        assert_eq!(settings.grid.side, 40);
        assert_eq!(settings.timer.interval_ms, 100);
        assert_eq!(settings.display.format, OutputFormat::Json);
        assert_eq!(settings.display.max_generations, None);
    }
}
