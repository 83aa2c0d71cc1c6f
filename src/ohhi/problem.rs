//! 0h h1 problem definition: ties config, puzzle, constraints and engine

use super::{Solution, SolutionValidator};
use crate::config::Settings;
use crate::puzzle::{load_puzzle_from_file, Grid};
use crate::solver::{ohhi_constraint_set, ConstraintSet, Outcome, SearchEngine, SolveResult};
use anyhow::{Context, Result};
use std::time::Instant;

/// A 0h h1 puzzle ready to be solved
pub struct PuzzleProblem {
    settings: Settings,
    puzzle: Grid,
    constraints: ConstraintSet,
    validator: SolutionValidator,
}

/// Outcome of running propagation alone, without any branching
#[derive(Debug, Clone)]
pub struct PropagationReport {
    pub forced_cells: usize,
    pub remaining_unset: usize,
    pub contradiction: bool,
}

impl PuzzleProblem {
    /// Create a problem from settings, loading the puzzle file
    pub fn new(settings: Settings) -> Result<Self> {
        let puzzle = load_puzzle_from_file(&settings.input.puzzle_file)
            .context("Failed to load puzzle file")?;
        Ok(Self::with_puzzle(settings, puzzle))
    }

    /// Create a problem with an explicit puzzle grid (useful for testing)
    pub fn with_puzzle(settings: Settings, puzzle: Grid) -> Self {
        let constraints = ohhi_constraint_set(settings.search.duplicate_detection);
        Self {
            settings,
            puzzle,
            constraints,
            validator: SolutionValidator::new(),
        }
    }

    /// Solve the puzzle. Returns `None` when no valid completion exists.
    /// A found solution is re-validated against all rules before it is
    /// handed back.
    pub fn solve(&self) -> Result<Option<Solution>> {
        let start_time = Instant::now();
        let mut engine = SearchEngine::with_branch_order(self.settings.search.branch_order.colours());

        match engine.solve(self.puzzle.clone(), &self.constraints) {
            SolveResult::Solved(solved) => {
                let validation = self.validator.validate(&self.puzzle, &solved);
                if !validation.is_valid {
                    anyhow::bail!("Engine produced an invalid solution:\n{validation}");
                }
                Ok(Some(Solution::new(
                    self.puzzle.clone(),
                    solved,
                    start_time.elapsed(),
                    engine.stats().clone(),
                )))
            }
            SolveResult::Infeasible => Ok(None),
        }
    }

    /// Run propagation to its fixpoint without branching
    pub fn analyze(&self) -> PropagationReport {
        let mut grid = self.puzzle.clone();
        let before = grid.unset_count();

        let mut engine = SearchEngine::new();
        let outcome = engine.propagate(&mut grid, &self.constraints);

        PropagationReport {
            forced_cells: before - grid.unset_count(),
            remaining_unset: grid.unset_count(),
            contradiction: outcome == Outcome::Contradiction,
        }
    }

    /// The puzzle grid as given
    pub fn puzzle(&self) -> &Grid {
        &self.puzzle
    }

    /// The problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl std::fmt::Display for PropagationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Propagation report:")?;
        writeln!(f, "  Cells forced: {}", self.forced_cells)?;
        writeln!(f, "  Remaining undecided: {}", self.remaining_unset)?;
        if self.contradiction {
            writeln!(f, "  The givens are contradictory: no solution exists")?;
        } else if self.remaining_unset == 0 {
            writeln!(f, "  Solvable by propagation alone, no branching needed")?;
        } else {
            writeln!(f, "  Branching search required to finish")?;
        }
        Ok(())
    }
}
