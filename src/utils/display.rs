//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::{Grid, RunState};
use anyhow::Result;
use serde::Serialize;

/// One rendered generation, as handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    pub generation: u64,
    pub state: RunState,
    pub living: usize,
    pub alive: Vec<Vec<bool>>,
    #[serde(skip)]
    grid: &'a Grid,
}

impl<'a> Frame<'a> {
    pub fn new(grid: &'a Grid, generation: u64, state: RunState) -> Self {
        Self {
            generation,
            state,
            living: grid.living_count(),
            alive: grid.to_rows(),
            grid,
        }
    }
}

/// Format grids and frames for console output
pub struct GridFormatter;

impl GridFormatter {
    /// Render a frame in the requested format
    pub fn format_frame(frame: &Frame<'_>, format: OutputFormat, show_coordinates: bool) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string(frame)?),
            OutputFormat::Text => {
                let (start_label, clear_label) = frame.state.labels();
                let mut output = format!(
                    "Generation {} | Living: {} | [{}] [{}]\n",
                    frame.generation, frame.living, start_label, clear_label
                );
                if show_coordinates {
                    output.push_str(&Self::format_grid_with_coords(frame.grid));
                } else {
                    output.push_str(&Self::format_grid_compact(frame.grid));
                }
                Ok(output)
            }
        }
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::new();
        for y in 0..grid.side() {
            for x in 0..grid.side() {
                output.push(if grid.get(y, x) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..grid.side() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for y in 0..grid.side() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..grid.side() {
                output.push_str(if grid.get(y, x) { " █" } else { " ·" });
            }
            output.push('\n');
        }

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
