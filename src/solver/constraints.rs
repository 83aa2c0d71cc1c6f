//! The 0h h1 constraint rules supplied to the search engine

use super::{Constraint, ConstraintSet, Outcome};
use crate::config::DuplicateDetection;
use crate::puzzle::{Cell, ForceResult, Grid, LineKind};
use itertools::Itertools;

/// Map a (line kind, line index, position) triple to grid coordinates
#[inline]
fn coords(kind: LineKind, line: usize, pos: usize) -> (usize, usize) {
    match kind {
        LineKind::Row => (line, pos),
        LineKind::Column => (pos, line),
    }
}

fn line_cells(grid: &Grid, kind: LineKind, line: usize) -> Vec<Cell> {
    match kind {
        LineKind::Row => grid.row_cells(line),
        LineKind::Column => grid.col_cells(line),
    }
}

/// No three consecutive cells of the same colour in any row or column.
///
/// A single scan over every 3-cell window covers all the forcing shapes:
/// `XX_` and `_XX` (adjacent pair) and `X_X` (sandwich) are each a window
/// with two equal decided cells and one undecided cell, whose undecided
/// cell must take the opposite colour. A fully decided equal window is a
/// contradiction.
pub struct NoTripleRule;

impl Constraint for NoTripleRule {
    fn name(&self) -> &'static str {
        "no-triple"
    }

    fn propagate(&self, grid: &mut Grid) -> Outcome {
        let n = grid.size;
        let mut forced = 0;

        for kind in [LineKind::Row, LineKind::Column] {
            for line in 0..n {
                for start in 0..n.saturating_sub(2) {
                    let window: Vec<(usize, Cell)> = (start..start + 3)
                        .map(|pos| {
                            let (r, c) = coords(kind, line, pos);
                            (pos, grid.get(r, c))
                        })
                        .collect();

                    let set: Vec<&(usize, Cell)> =
                        window.iter().filter(|(_, c)| c.is_set()).collect();

                    match set.len() {
                        3 if set[0].1 == set[1].1 && set[1].1 == set[2].1 => {
                            return Outcome::Contradiction;
                        }
                        2 if set[0].1 == set[1].1 => {
                            if let Some(&(pos, _)) = window.iter().find(|(_, c)| !c.is_set()) {
                                let (r, c) = coords(kind, line, pos);
                                match grid.force(r, c, set[0].1.opposite()) {
                                    ForceResult::Forced => forced += 1,
                                    ForceResult::Unchanged => {}
                                    ForceResult::Conflict => return Outcome::Contradiction,
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        if forced > 0 {
            Outcome::Progress(forced)
        } else {
            Outcome::NoProgress
        }
    }
}

/// Every row and column contains exactly `size / 2` cells of each colour.
///
/// A colour over quota is a contradiction; a colour exactly at quota forces
/// every remaining undecided cell of the line to the other colour.
pub struct BalancedCountRule;

impl Constraint for BalancedCountRule {
    fn name(&self) -> &'static str {
        "balanced-count"
    }

    fn propagate(&self, grid: &mut Grid) -> Outcome {
        let n = grid.size;
        let quota = n / 2;
        let mut forced = 0;

        for kind in [LineKind::Row, LineKind::Column] {
            for line in 0..n {
                let cells = line_cells(grid, kind, line);
                let reds = cells.iter().filter(|&&c| c == Cell::Red).count();
                let blues = cells.iter().filter(|&&c| c == Cell::Blue).count();

                if reds > quota || blues > quota {
                    return Outcome::Contradiction;
                }

                let fill = if reds == quota {
                    Cell::Blue
                } else if blues == quota {
                    Cell::Red
                } else {
                    continue;
                };

                for (pos, _) in cells.iter().enumerate().filter(|(_, c)| !c.is_set()) {
                    let (r, c) = coords(kind, line, pos);
                    match grid.force(r, c, fill) {
                        ForceResult::Forced => forced += 1,
                        ForceResult::Unchanged => {}
                        ForceResult::Conflict => return Outcome::Contradiction,
                    }
                }
            }
        }

        if forced > 0 {
            Outcome::Progress(forced)
        } else {
            Outcome::NoProgress
        }
    }
}

/// No two rows are identical and no two columns are identical.
///
/// In `CompleteLines` mode only fully decided identical pairs are flagged.
/// In `PartialLines` mode two same-kind lines that agree on `size / 2`
/// positions of one colour are already contradictory: a balanced completion
/// gives both lines exactly that colour set, so they end up identical no
/// matter how the undecided cells are filled. This also covers the
/// "one undecided cell away from a duplicate" case, which balance alone
/// forces into the duplicate.
pub struct NoDuplicateLineRule {
    mode: DuplicateDetection,
}

impl NoDuplicateLineRule {
    pub fn new(mode: DuplicateDetection) -> Self {
        Self { mode }
    }

    fn pair_is_contradictory(&self, a: &[Cell], b: &[Cell], quota: usize) -> bool {
        match self.mode {
            DuplicateDetection::CompleteLines => {
                a.iter().all(|c| c.is_set()) && b.iter().all(|c| c.is_set()) && a == b
            }
            DuplicateDetection::PartialLines => {
                let shared = |colour: Cell| {
                    a.iter()
                        .zip(b.iter())
                        .filter(|&(&x, &y)| x == colour && y == colour)
                        .count()
                };
                shared(Cell::Red) >= quota || shared(Cell::Blue) >= quota
            }
        }
    }
}

impl Constraint for NoDuplicateLineRule {
    fn name(&self) -> &'static str {
        "no-duplicate-line"
    }

    fn propagate(&self, grid: &mut Grid) -> Outcome {
        let n = grid.size;
        let quota = n / 2;

        for kind in [LineKind::Row, LineKind::Column] {
            let lines: Vec<Vec<Cell>> = (0..n).map(|i| line_cells(grid, kind, i)).collect();
            for (i, j) in (0..n).tuple_combinations() {
                if self.pair_is_contradictory(&lines[i], &lines[j], quota) {
                    return Outcome::Contradiction;
                }
            }
        }

        Outcome::NoProgress
    }
}

/// The standard 0h h1 constraint set, in a fixed deterministic order
pub fn ohhi_constraint_set(duplicate_detection: DuplicateDetection) -> ConstraintSet {
    let mut set = ConstraintSet::new();
    set.push(Box::new(NoTripleRule));
    set.push(Box::new(BalancedCountRule));
    set.push(Box::new(NoDuplicateLineRule::new(duplicate_detection)));
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_puzzle_from_string;

    fn propagate_to_fixpoint(set: &ConstraintSet, grid: &mut Grid) -> Outcome {
        loop {
            match set.propagate(grid) {
                Outcome::Progress(_) => continue,
                outcome => return outcome,
            }
        }
    }

    #[test]
    fn test_no_triple_forces_adjacent_pair() {
        let mut grid = parse_puzzle_from_string("rr..\n....\n....\n....\n").unwrap();
        let outcome = NoTripleRule.propagate(&mut grid);
        assert!(outcome.made_progress());
        assert_eq!(grid.get(0, 2), Cell::Blue);
    }

    #[test]
    fn test_no_triple_forces_sandwich() {
        let mut grid = parse_puzzle_from_string("b.b.\n....\n....\n....\n").unwrap();
        NoTripleRule.propagate(&mut grid);
        assert_eq!(grid.get(0, 1), Cell::Red);
    }

    #[test]
    fn test_no_triple_forces_in_column() {
        let mut grid = parse_puzzle_from_string("r...\nr...\n....\n....\n").unwrap();
        NoTripleRule.propagate(&mut grid);
        assert_eq!(grid.get(2, 0), Cell::Blue);
    }

    #[test]
    fn test_no_triple_contradiction() {
        let mut grid = parse_puzzle_from_string("bbb.\n....\n....\n....\n").unwrap();
        assert_eq!(NoTripleRule.propagate(&mut grid), Outcome::Contradiction);
    }

    #[test]
    fn test_balanced_count_fills_line() {
        let mut grid = parse_puzzle_from_string("rr..\n....\n....\n....\n").unwrap();
        let outcome = BalancedCountRule.propagate(&mut grid);
        assert!(outcome.made_progress());
        assert_eq!(grid.get(0, 2), Cell::Blue);
        assert_eq!(grid.get(0, 3), Cell::Blue);
    }

    #[test]
    fn test_balanced_count_over_quota_contradiction() {
        let mut grid = parse_puzzle_from_string("r.rr\n....\n....\n....\n").unwrap();
        assert_eq!(BalancedCountRule.propagate(&mut grid), Outcome::Contradiction);
    }

    #[test]
    fn test_duplicate_complete_lines_contradiction() {
        let rule = NoDuplicateLineRule::new(DuplicateDetection::CompleteLines);
        let mut grid = parse_puzzle_from_string("rrbb\nrrbb\n....\n....\n").unwrap();
        assert_eq!(rule.propagate(&mut grid), Outcome::Contradiction);

        // a partial match is not enough in this mode
        let mut grid = parse_puzzle_from_string("rrbb\nrr..\n....\n....\n").unwrap();
        assert_eq!(rule.propagate(&mut grid), Outcome::NoProgress);
    }

    #[test]
    fn test_duplicate_partial_lines_contradiction() {
        let rule = NoDuplicateLineRule::new(DuplicateDetection::PartialLines);

        // rows 0 and 1 already share both red cells; any balanced
        // completion of row 1 duplicates row 0
        let mut grid = parse_puzzle_from_string("rrbb\nrr..\n....\n....\n").unwrap();
        assert_eq!(rule.propagate(&mut grid), Outcome::Contradiction);

        // one shared red is fine
        let mut grid = parse_puzzle_from_string("rrbb\nr...\n....\n....\n").unwrap();
        assert_eq!(rule.propagate(&mut grid), Outcome::NoProgress);
    }

    #[test]
    fn test_duplicate_columns_detected() {
        let rule = NoDuplicateLineRule::new(DuplicateDetection::CompleteLines);
        let mut grid = parse_puzzle_from_string("rr..\nbb..\nrr..\nbb..\n").unwrap();
        assert_eq!(rule.propagate(&mut grid), Outcome::Contradiction);
    }

    #[test]
    fn test_full_set_forces_row_scenario() {
        // "rr.." plus the balance rule must complete the row to "rrbb"
        let set = ohhi_constraint_set(DuplicateDetection::PartialLines);
        let mut grid = parse_puzzle_from_string("rr..\n....\n....\n....\n").unwrap();
        let outcome = propagate_to_fixpoint(&set, &mut grid);
        assert_eq!(outcome, Outcome::NoProgress);
        assert_eq!(grid.row_cells(0), vec![Cell::Red, Cell::Red, Cell::Blue, Cell::Blue]);
    }

    #[test]
    fn test_propagation_idempotent_at_fixpoint() {
        let set = ohhi_constraint_set(DuplicateDetection::PartialLines);
        let mut grid = parse_puzzle_from_string("rr..\n....\n....\n....\n").unwrap();
        propagate_to_fixpoint(&set, &mut grid);

        let snapshot = grid.clone();
        assert_eq!(set.propagate(&mut grid), Outcome::NoProgress);
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_propagation_never_unsets_cells() {
        let set = ohhi_constraint_set(DuplicateDetection::PartialLines);
        let mut grid = parse_puzzle_from_string("rb..\nbr..\n....\n....\n").unwrap();
        let before = grid.clone();
        propagate_to_fixpoint(&set, &mut grid);

        for (p, s) in before.cells.iter().zip(&grid.cells) {
            if p.is_set() {
                assert_eq!(p, s);
            }
        }
    }

    #[test]
    fn test_complete_valid_grid_is_fixpoint() {
        let set = ohhi_constraint_set(DuplicateDetection::PartialLines);
        let mut grid = parse_puzzle_from_string("rrbb\nbbrr\nrbrb\nbrbr\n").unwrap();
        assert_eq!(set.propagate(&mut grid), Outcome::NoProgress);
    }
}
