//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::ohhi::Solution;
use crate::puzzle::{Cell, Grid};
use anyhow::Result;
use std::path::Path;

/// Format solutions for display and saving
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution, show_stats: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "=== {}x{} puzzle, {} givens ===\n",
            solution.metadata.size, solution.metadata.size, solution.metadata.given_cells
        ));
        output.push_str(&format!(
            "Solve time: {:.3}s\n",
            solution.solve_time.as_secs_f64()
        ));
        if solution.solved_by_propagation_alone() {
            output.push_str("Solved by propagation alone\n");
        } else {
            output.push_str(&format!(
                "Branches explored: {}\n",
                solution.metadata.stats.branches
            ));
        }
        output.push('\n');

        output.push_str("Puzzle:\n");
        output.push_str(&Self::format_grid_compact(&solution.puzzle));
        output.push('\n');
        output.push_str("Solution:\n");
        output.push_str(&Self::format_grid_compact(&solution.solved));

        if show_stats {
            output.push('\n');
            output.push_str(&solution.metadata.stats.to_string());
        }

        output
    }

    /// Format a grid in its puzzle-file form
    pub fn format_grid_compact(grid: &Grid) -> String {
        grid.to_string()
    }

    /// Format a grid with row and column coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..grid.size {
            output.push_str(&format!("{} ", col % 10));
        }
        output.push('\n');

        for row in 0..grid.size {
            output.push_str(&format!("{row:2} "));
            for col in 0..grid.size {
                output.push(grid.get(row, col).to_char());
                output.push(' ');
            }
            output.push('\n');
        }

        output
    }

    /// Format a grid with terminal colours, one coloured block per cell
    pub fn format_grid_coloured(grid: &Grid) -> String {
        let mut output = String::new();
        for row in 0..grid.size {
            for col in 0..grid.size {
                let block = match grid.get(row, col) {
                    Cell::Red => ColorOutput::colored("██", Color::Red),
                    Cell::Blue => ColorOutput::colored("██", Color::Blue),
                    Cell::Unset => "··".to_string(),
                };
                output.push_str(&block);
            }
            output.push('\n');
        }
        output
    }

    /// Save a solution to the output directory in the configured format
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        match format {
            OutputFormat::Text => {
                let path = output_dir.join("solution.txt");
                std::fs::write(path, Self::format_solution(solution, true))?;
            }
            OutputFormat::Json => {
                let path = output_dir.join("solution.json");
                solution.save_to_file(path)?;
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if the terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
