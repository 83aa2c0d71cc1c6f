//! Solution representation for 0h h1 puzzles

use crate::puzzle::Grid;
use crate::solver::SearchStats;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A solved 0h h1 puzzle together with how it was solved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The puzzle as given
    pub puzzle: Grid,
    /// The completed grid
    pub solved: Grid,
    /// Time taken to find the solution
    #[serde(skip)]
    pub solve_time: Duration,
    /// Metadata about the solve
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Side length of the grid
    pub size: usize,
    /// Cells decided in the puzzle as given
    pub given_cells: usize,
    /// Cells the solver had to determine
    pub filled_cells: usize,
    /// Search statistics from the engine
    pub stats: SearchStats,
}

impl Solution {
    /// Create a solution from the puzzle, its completion and the engine stats
    pub fn new(puzzle: Grid, solved: Grid, solve_time: Duration, stats: SearchStats) -> Self {
        let size = puzzle.size;
        let given_cells = puzzle.set_count();
        let filled_cells = solved.set_count() - given_cells;

        Self {
            puzzle,
            solved,
            solve_time,
            metadata: SolutionMetadata {
                size,
                given_cells,
                filled_cells,
                stats,
            },
        }
    }

    /// Whether the solver never had to branch
    pub fn solved_by_propagation_alone(&self) -> bool {
        self.metadata.stats.branches == 0
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file as JSON
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_puzzle_from_string;

    fn sample_solution() -> Solution {
        let puzzle = parse_puzzle_from_string("rr..\n....\n....\n....\n").unwrap();
        let solved = parse_puzzle_from_string("rrbb\nbbrr\nrbrb\nbrbr\n").unwrap();
        Solution::new(puzzle, solved, Duration::from_millis(3), SearchStats::default())
    }

    #[test]
    fn test_metadata_counts() {
        let solution = sample_solution();
        assert_eq!(solution.metadata.size, 4);
        assert_eq!(solution.metadata.given_cells, 2);
        assert_eq!(solution.metadata.filled_cells, 14);
        assert!(solution.solved_by_propagation_alone());
    }

    #[test]
    fn test_json_round_trip() {
        let solution = sample_solution();
        let json = solution.to_json().unwrap();
        let restored = Solution::from_json(&json).unwrap();

        assert_eq!(restored.puzzle, solution.puzzle);
        assert_eq!(restored.solved, solution.solved);
        assert_eq!(restored.metadata.given_cells, solution.metadata.given_cells);
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("solution.json");

        let solution = sample_solution();
        solution.save_to_file(&path).unwrap();
        let restored = Solution::load_from_file(&path).unwrap();

        assert_eq!(restored.solved, solution.solved);
    }
}
