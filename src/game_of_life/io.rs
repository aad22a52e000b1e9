//! File I/O operations for seed patterns

use super::Grid;
use anyhow::{Context, Result};
use std::path::Path;

/// Built-in patterns written by `create_example_patterns`
pub const EXAMPLE_PATTERNS: [(&str, &str); 5] = [
    ("blinker", "000\n111\n000\n"),
    ("block", "0000\n0110\n0110\n0000\n"),
    ("glider", "00100\n10100\n01100\n00000\n00000\n"),
    ("beacon", "1100\n1100\n0011\n0011\n"),
    ("r_pentomino", "011\n110\n010\n"),
];

/// Load a pattern from a text file
/// Format: Each line represents a row, with '1' for alive cells and '0' for dead cells
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a pattern from its text representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let mut rows = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        let row = line.chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => anyhow::bail!("Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                                   ch, row_idx, col_idx),
            })
            .collect::<Result<Vec<bool>>>()?;
        rows.push(row);
    }

    Grid::from_rows(rows)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid_to_string(grid))
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to its text representation
pub fn grid_to_string(grid: &Grid) -> String {
    let side = grid.side();
    let mut result = String::with_capacity(side * (side + 1));

    for row in 0..side {
        for col in 0..side {
            result.push(if grid.get(row, col) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Write the built-in example patterns into `output_dir`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, content) in EXAMPLE_PATTERNS {
        let path = dir.join(format!("{}.txt", name));
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
