//! Generic propagate-then-search engine
//!
//! The engine is puzzle-agnostic: it drives any `ConstraintSet` to a
//! fixpoint, branches on the first undecided cell, and backtracks by
//! discarding the branch's grid copy. Nothing here knows the 0h h1 rules.

use super::{ConstraintSet, Outcome};
use crate::puzzle::{Cell, Grid};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a solve call. Infeasibility is an expected outcome,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    Solved(Grid),
    Infeasible,
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveResult::Solved(_))
    }

    pub fn solved_grid(&self) -> Option<&Grid> {
        match self {
            SolveResult::Solved(grid) => Some(grid),
            SolveResult::Infeasible => None,
        }
    }

    pub fn into_grid(self) -> Option<Grid> {
        match self {
            SolveResult::Solved(grid) => Some(grid),
            SolveResult::Infeasible => None,
        }
    }
}

/// One branching decision taken during the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDecision {
    pub row: usize,
    pub col: usize,
    pub colour: Cell,
    pub depth: usize,
}

/// Counters collected over one solve call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Constraint-set sweeps performed across all branches
    pub propagation_passes: usize,
    /// Cells decided by propagation (branch cells not included)
    pub cells_forced: usize,
    /// Branches tried (each colour attempt counts as one)
    pub branches: usize,
    /// Deepest point of the search tree reached
    pub max_depth: usize,
    /// The branch decisions in the order they were taken
    pub decisions: Vec<BranchDecision>,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search statistics:")?;
        writeln!(f, "  Propagation passes: {}", self.propagation_passes)?;
        writeln!(f, "  Cells forced: {}", self.cells_forced)?;
        writeln!(f, "  Branches explored: {}", self.branches)?;
        writeln!(f, "  Max search depth: {}", self.max_depth)?;
        Ok(())
    }
}

/// Depth-first search driver over a constraint set
pub struct SearchEngine {
    branch_order: [Cell; 2],
    stats: SearchStats,
}

impl SearchEngine {
    /// Create an engine that tries red before blue at each branch point
    pub fn new() -> Self {
        Self::with_branch_order([Cell::Red, Cell::Blue])
    }

    /// Create an engine with an explicit colour trial order
    pub fn with_branch_order(branch_order: [Cell; 2]) -> Self {
        Self {
            branch_order,
            stats: SearchStats::default(),
        }
    }

    /// Statistics from the most recent solve call
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Sweep the constraint set until it reports `NoProgress` or
    /// `Contradiction`. Forced cells of one sweep may unlock further
    /// forcing in the next, hence the loop.
    pub fn propagate(&mut self, grid: &mut Grid, constraints: &ConstraintSet) -> Outcome {
        loop {
            self.stats.propagation_passes += 1;
            match constraints.propagate(grid) {
                Outcome::Progress(n) => self.stats.cells_forced += n,
                outcome => return outcome,
            }
        }
    }

    /// Solve the grid against the constraint set. Takes ownership of the
    /// grid; every branch works on its own copy, so callers keep their
    /// original if they clone before the call.
    pub fn solve(&mut self, grid: Grid, constraints: &ConstraintSet) -> SolveResult {
        self.stats = SearchStats::default();
        self.solve_at(grid, constraints, 0)
    }

    fn solve_at(&mut self, mut grid: Grid, constraints: &ConstraintSet, depth: usize) -> SolveResult {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if self.propagate(&mut grid, constraints) == Outcome::Contradiction {
            return SolveResult::Infeasible;
        }

        // At fixpoint. A complete grid at fixpoint satisfies every
        // constraint, otherwise the sweep would have reported Contradiction.
        let Some((row, col)) = grid.first_unset() else {
            return SolveResult::Solved(grid);
        };

        for colour in self.branch_order {
            let mut branch = grid.clone();
            let idx = branch.index(row, col);
            branch.cells[idx] = colour;

            self.stats.branches += 1;
            self.stats.decisions.push(BranchDecision {
                row,
                col,
                colour,
                depth,
            });

            if let SolveResult::Solved(solved) = self.solve_at(branch, constraints, depth + 1) {
                return SolveResult::Solved(solved);
            }
        }

        SolveResult::Infeasible
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicateDetection;
    use crate::puzzle::{parse_puzzle_from_string, OhHiRules};
    use crate::solver::ohhi_constraint_set;

    fn standard_set() -> ConstraintSet {
        ohhi_constraint_set(DuplicateDetection::PartialLines)
    }

    #[test]
    fn test_already_valid_grid_returned_unchanged() {
        let grid = parse_puzzle_from_string("rrbb\nbbrr\nrbrb\nbrbr\n").unwrap();
        let mut engine = SearchEngine::new();

        let result = engine.solve(grid.clone(), &standard_set());
        assert_eq!(result, SolveResult::Solved(grid));
        assert_eq!(engine.stats().branches, 0);
    }

    #[test]
    fn test_propagation_only_puzzle() {
        // one row of givens cascades through triple and balance rules
        let grid = parse_puzzle_from_string("rr..\n....\n....\n....\n").unwrap();
        let mut engine = SearchEngine::new();

        let result = engine.solve(grid, &standard_set());
        let solved = result.solved_grid().expect("puzzle must be solvable");
        assert_eq!(
            solved.row_cells(0),
            vec![Cell::Red, Cell::Red, Cell::Blue, Cell::Blue]
        );
        assert!(OhHiRules::is_valid_solution(solved));
    }

    #[test]
    fn test_duplicate_rows_infeasible() {
        let grid = parse_puzzle_from_string("rrbb\nrrbb\n....\n....\n").unwrap();
        let mut engine = SearchEngine::new();
        assert_eq!(engine.solve(grid, &standard_set()), SolveResult::Infeasible);
    }

    #[test]
    fn test_over_quota_pruned_without_branching() {
        // three reds in one row: contradiction on the first fixpoint,
        // before any branch is opened
        let grid = parse_puzzle_from_string("rr.r\n....\n....\n....\n").unwrap();
        let mut engine = SearchEngine::new();

        assert_eq!(engine.solve(grid, &standard_set()), SolveResult::Infeasible);
        assert_eq!(engine.stats().branches, 0);
    }

    #[test]
    fn test_empty_grid_solved_with_invariants() {
        for size in [2, 4, 6] {
            let grid = Grid::new(size).unwrap();
            let mut engine = SearchEngine::new();

            let result = engine.solve(grid, &standard_set());
            let solved = result.solved_grid().expect("empty grid must be solvable");
            assert!(OhHiRules::is_valid_solution(solved));
        }
    }

    #[test]
    fn test_solution_respects_givens() {
        let puzzle = parse_puzzle_from_string("r....b\n..b...\n..r..r\n.b....\nb...r.\n..r.r.\n")
            .unwrap();
        let mut engine = SearchEngine::new();

        let result = engine.solve(puzzle.clone(), &standard_set());
        let solved = result.solved_grid().expect("puzzle must be solvable");
        assert!(OhHiRules::is_valid_solution(solved));
        assert!(OhHiRules::respects_givens(&puzzle, solved));
    }

    #[test]
    fn test_determinism() {
        let grid = Grid::new(6).unwrap();

        let mut first = SearchEngine::new();
        let mut second = SearchEngine::new();
        let a = first.solve(grid.clone(), &standard_set());
        let b = second.solve(grid, &standard_set());

        assert_eq!(a, b);
        assert_eq!(first.stats().branches, second.stats().branches);
        assert_eq!(first.stats().decisions, second.stats().decisions);
    }

    #[test]
    fn test_branch_order_respected() {
        // the empty grid forces nothing, so the first decision is the
        // engine's first trial colour at (0, 0)
        let grid = Grid::new(4).unwrap();

        let mut red_first = SearchEngine::new();
        let solved = red_first
            .solve(grid.clone(), &standard_set())
            .into_grid()
            .unwrap();
        assert_eq!(solved.get(0, 0), Cell::Red);
        assert_eq!(red_first.stats().decisions[0].colour, Cell::Red);

        let mut blue_first = SearchEngine::with_branch_order([Cell::Blue, Cell::Red]);
        let solved = blue_first.solve(grid, &standard_set()).into_grid().unwrap();
        assert_eq!(solved.get(0, 0), Cell::Blue);
    }

    #[test]
    fn test_stats_reset_between_solves() {
        let mut engine = SearchEngine::new();
        let set = standard_set();

        engine.solve(Grid::new(4).unwrap(), &set);
        let branches_first = engine.stats().branches;

        let grid = parse_puzzle_from_string("rrbb\nbbrr\nrbrb\nbrbr\n").unwrap();
        engine.solve(grid, &set);
        assert_eq!(engine.stats().branches, 0);
        assert!(branches_first > 0);
    }
}
