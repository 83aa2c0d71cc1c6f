//! 0h h1 rule checks over whole grids
//!
//! These are the offline checks used by the validator and tests. The
//! incremental, forcing versions of the same rules live in
//! `crate::solver::constraints`.

use super::{Cell, Grid};
use rayon::prelude::*;

/// Which axis a line runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Row,
    Column,
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineKind::Row => write!(f, "row"),
            LineKind::Column => write!(f, "column"),
        }
    }
}

/// Whole-grid 0h h1 rules engine
pub struct OhHiRules;

impl OhHiRules {
    /// Find a run of three equal, decided cells. Returns the line kind, the
    /// line index and the window start offset of the first run found.
    pub fn find_triple(grid: &Grid) -> Option<(LineKind, usize, usize)> {
        let n = grid.size;
        for i in 0..n {
            for s in 0..n.saturating_sub(2) {
                let r = [grid.get(i, s), grid.get(i, s + 1), grid.get(i, s + 2)];
                if r[0].is_set() && r[0] == r[1] && r[1] == r[2] {
                    return Some((LineKind::Row, i, s));
                }
                let c = [grid.get(s, i), grid.get(s + 1, i), grid.get(s + 2, i)];
                if c[0].is_set() && c[0] == c[1] && c[1] == c[2] {
                    return Some((LineKind::Column, i, s));
                }
            }
        }
        None
    }

    /// Find a line whose colour counts cannot reach the required balance.
    /// For a complete grid this means any imbalance; for a partial grid it
    /// means a colour already over quota.
    pub fn find_unbalanced_line(grid: &Grid) -> Option<(LineKind, usize)> {
        let n = grid.size;
        let quota = n / 2;
        for i in 0..n {
            if grid.count_in_row(i, Cell::Red) > quota
                || grid.count_in_row(i, Cell::Blue) > quota
            {
                return Some((LineKind::Row, i));
            }
            if grid.count_in_col(i, Cell::Red) > quota
                || grid.count_in_col(i, Cell::Blue) > quota
            {
                return Some((LineKind::Column, i));
            }
        }
        None
    }

    /// Find two identical, fully decided lines of the same kind
    pub fn find_duplicate_lines(grid: &Grid) -> Option<(LineKind, usize, usize)> {
        let n = grid.size;
        // pair scan is quadratic in n; parallelise over the first index
        (0..n).into_par_iter().find_map_first(|i| {
            let row_i = grid.row_cells(i);
            let col_i = grid.col_cells(i);
            let row_complete = row_i.iter().all(|c| c.is_set());
            let col_complete = col_i.iter().all(|c| c.is_set());
            for j in (i + 1)..n {
                if row_complete && row_i == grid.row_cells(j) {
                    return Some((LineKind::Row, i, j));
                }
                if col_complete && col_i == grid.col_cells(j) {
                    return Some((LineKind::Column, i, j));
                }
            }
            None
        })
    }

    /// Whether a complete grid satisfies all four 0h h1 invariants
    pub fn is_valid_solution(grid: &Grid) -> bool {
        grid.is_complete()
            && Self::find_triple(grid).is_none()
            && Self::find_unbalanced_line(grid).is_none()
            && Self::find_duplicate_lines(grid).is_none()
    }

    /// Whether `solved` keeps every decided cell of `puzzle` unchanged
    pub fn respects_givens(puzzle: &Grid, solved: &Grid) -> bool {
        puzzle.size == solved.size
            && puzzle
                .cells
                .iter()
                .zip(&solved.cells)
                .all(|(p, s)| !p.is_set() || p == s)
    }
}
