//! Solution validation for 0h h1 puzzles

use crate::puzzle::{Grid, LineKind, OhHiRules};
use std::fmt;

/// Checks claimed solutions against the puzzle rules
pub struct SolutionValidator;

/// Result of validating a claimed solution
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<RuleViolation>,
}

/// A single rule violation found during validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// The grid still contains undecided cells
    Incomplete { unset_cells: usize },
    /// The grids have different sizes
    SizeMismatch { puzzle: usize, solved: usize },
    /// A decided puzzle cell was changed
    GivenChanged { row: usize, col: usize },
    /// Three consecutive cells of one colour
    Triple {
        kind: LineKind,
        line: usize,
        start: usize,
    },
    /// A line with a colour over its quota
    Unbalanced { kind: LineKind, line: usize },
    /// Two identical lines of the same kind
    DuplicateLines {
        kind: LineKind,
        first: usize,
        second: usize,
    },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::Incomplete { unset_cells } => {
                write!(f, "grid is incomplete: {unset_cells} cells undecided")
            }
            RuleViolation::SizeMismatch { puzzle, solved } => {
                write!(f, "size mismatch: puzzle is {puzzle}x{puzzle}, solution is {solved}x{solved}")
            }
            RuleViolation::GivenChanged { row, col } => {
                write!(f, "given cell ({row}, {col}) was changed")
            }
            RuleViolation::Triple { kind, line, start } => {
                write!(f, "three equal cells in {kind} {line} starting at offset {start}")
            }
            RuleViolation::Unbalanced { kind, line } => {
                write!(f, "{kind} {line} has a colour over quota")
            }
            RuleViolation::DuplicateLines { kind, first, second } => {
                write!(f, "{kind}s {first} and {second} are identical")
            }
        }
    }
}

impl SolutionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a claimed solution against the puzzle it solves
    pub fn validate(&self, puzzle: &Grid, solved: &Grid) -> ValidationResult {
        let mut violations = Vec::new();

        if puzzle.size != solved.size {
            violations.push(RuleViolation::SizeMismatch {
                puzzle: puzzle.size,
                solved: solved.size,
            });
            return ValidationResult {
                is_valid: false,
                violations,
            };
        }

        if !solved.is_complete() {
            violations.push(RuleViolation::Incomplete {
                unset_cells: solved.unset_count(),
            });
        }

        for (idx, (p, s)) in puzzle.cells.iter().zip(&solved.cells).enumerate() {
            if p.is_set() && p != s {
                violations.push(RuleViolation::GivenChanged {
                    row: idx / puzzle.size,
                    col: idx % puzzle.size,
                });
            }
        }

        violations.extend(Self::grid_violations(solved));

        ValidationResult {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    /// Rule violations of a grid on its own, ignoring any puzzle givens.
    /// Used to diagnose why a puzzle is infeasible: if the givens already
    /// break a rule, this names the first broken one.
    pub fn grid_violations(grid: &Grid) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        if let Some((kind, line, start)) = OhHiRules::find_triple(grid) {
            violations.push(RuleViolation::Triple { kind, line, start });
        }
        if let Some((kind, line)) = OhHiRules::find_unbalanced_line(grid) {
            violations.push(RuleViolation::Unbalanced { kind, line });
        }
        if let Some((kind, first, second)) = OhHiRules::find_duplicate_lines(grid) {
            violations.push(RuleViolation::DuplicateLines { kind, first, second });
        }

        violations
    }
}

impl Default for SolutionValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Validation result: {}",
            if self.is_valid { "VALID" } else { "INVALID" }
        )?;
        for violation in &self.violations {
            writeln!(f, "  - {violation}")?;
        }
        Ok(())
    }
}
