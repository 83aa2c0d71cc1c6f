//! 0h h1 constraint-propagation solver
//!
//! This library solves binary-grid puzzles of the "0h h1" family by driving
//! a set of pluggable constraint rules to a fixpoint and falling back to
//! depth-first search with backtracking when propagation stalls.

pub mod config;
pub mod ohhi;
pub mod puzzle;
pub mod solver;
pub mod utils;

pub use config::Settings;
pub use ohhi::{PuzzleProblem, Solution};

use anyhow::Result;

/// Main entry point: load and solve the puzzle named by the settings.
/// Returns `None` when the puzzle has no valid completion.
pub fn solve_puzzle(settings: Settings) -> Result<Option<Solution>> {
    let problem = PuzzleProblem::new(settings)?;
    problem.solve()
}
