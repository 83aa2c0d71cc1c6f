//! File I/O operations for 0h h1 puzzle grids

use super::{Cell, Grid, PuzzleError};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a puzzle from a text file.
/// Format: one line per row, 'r' for a red cell, 'b' for a blue cell,
/// '.' for an undecided cell.
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_puzzle_from_string(&content)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Parse a puzzle from its string representation
pub fn parse_puzzle_from_string(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(PuzzleError::Empty.into());
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(line.chars().count());
        for (col_idx, ch) in line.chars().enumerate() {
            let cell = Cell::from_char(ch).ok_or(PuzzleError::InvalidCharacter {
                ch,
                row: row_idx,
                col: col_idx,
            })?;
            row.push(cell);
        }
        rows.push(row);
    }

    Ok(Grid::from_rows(rows)?)
}

/// Convert a grid back to its puzzle-file representation
pub fn puzzle_to_string(grid: &Grid) -> String {
    grid.to_string()
}

/// Save a grid to a text file
pub fn save_puzzle_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, puzzle_to_string(grid))
        .with_context(|| format!("Failed to write puzzle to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example puzzle files for testing and setup
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Small puzzle where the first two rows are forced outright
    let easy_content = "rr..\n..rr\n....\n....\n";
    std::fs::write(dir.join("easy_4x4.txt"), easy_content)
        .context("Failed to write easy_4x4.txt")?;

    // Empty board, forces the solver to branch
    let empty_content = "....\n....\n....\n....\n";
    std::fs::write(dir.join("empty_4x4.txt"), empty_content)
        .context("Failed to write empty_4x4.txt")?;

    // Mid-size puzzle with scattered givens
    let medium_content = "r....b\n..b...\n..r..r\n.b....\nb...r.\n..r.r.\n";
    std::fs::write(dir.join("medium_6x6.txt"), medium_content)
        .context("Failed to write medium_6x6.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_puzzle_from_string() {
        let content = "rb..\nbr..\n....\n....\n";
        let grid = parse_puzzle_from_string(content).unwrap();

        assert_eq!(grid.size, 4);
        assert_eq!(grid.get(0, 0), Cell::Red);
        assert_eq!(grid.get(0, 1), Cell::Blue);
        assert_eq!(grid.get(1, 0), Cell::Blue);
        assert_eq!(grid.get(2, 2), Cell::Unset);
        assert_eq!(grid.set_count(), 4);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let content = "\nrb\n\nbr\n\n";
        let grid = parse_puzzle_from_string(content).unwrap();
        assert_eq!(grid.size, 2);
        assert!(grid.is_complete());
    }

    #[test]
    fn test_round_trip() {
        let content = "rb..\nbr..\n..rb\n..br\n";
        let grid = parse_puzzle_from_string(content).unwrap();
        assert_eq!(puzzle_to_string(&grid), content);
    }

    #[test]
    fn test_invalid_input() {
        // invalid character
        assert!(parse_puzzle_from_string("rb\nbx\n").is_err());
        // inconsistent row lengths
        assert!(parse_puzzle_from_string("rb..\nbr\n....\n....\n").is_err());
        // non-square (2 rows of 4)
        assert!(parse_puzzle_from_string("rb..\nbr..\n").is_err());
        // odd size
        assert!(parse_puzzle_from_string("rb.\nbr.\n..r\n").is_err());
        // empty content
        assert!(parse_puzzle_from_string("").is_err());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_puzzle.txt");

        let original = parse_puzzle_from_string("rb..\nbr..\n....\n....\n").unwrap();
        save_puzzle_to_file(&original, &file_path).unwrap();

        let loaded = load_puzzle_from_file(&file_path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_create_example_puzzles() {
        let temp_dir = tempdir().unwrap();
        create_example_puzzles(temp_dir.path()).unwrap();

        for name in ["easy_4x4.txt", "empty_4x4.txt", "medium_6x6.txt"] {
            let path = temp_dir.path().join(name);
            assert!(path.exists());
            // every example must parse as a well-formed puzzle
            load_puzzle_from_file(&path).unwrap();
        }
    }
}
