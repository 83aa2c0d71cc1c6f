//! The constraint capability the search engine is generic over

use crate::puzzle::Grid;

/// Result of one propagation sweep over a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The grid admits no valid completion
    Contradiction,
    /// This many previously undecided cells were forced
    Progress(usize),
    /// Nothing could be forced and no contradiction was found
    NoProgress,
}

impl Outcome {
    /// Combine two sweep results: contradictions dominate, progress counts add
    pub fn combine(self, other: Outcome) -> Outcome {
        match (self, other) {
            (Outcome::Contradiction, _) | (_, Outcome::Contradiction) => Outcome::Contradiction,
            (Outcome::Progress(a), Outcome::Progress(b)) => Outcome::Progress(a + b),
            (Outcome::Progress(a), Outcome::NoProgress)
            | (Outcome::NoProgress, Outcome::Progress(a)) => Outcome::Progress(a),
            (Outcome::NoProgress, Outcome::NoProgress) => Outcome::NoProgress,
        }
    }

    /// Whether this sweep forced at least one cell
    pub fn made_progress(self) -> bool {
        matches!(self, Outcome::Progress(n) if n > 0)
    }
}

/// A single propagation rule. Implementations are stateless: each call
/// re-derives everything from the grid it is handed and must not retain
/// references beyond the call.
pub trait Constraint {
    /// Rule name used in diagnostics and traces
    fn name(&self) -> &'static str;

    /// Scan the grid once, forcing any cells this rule determines.
    /// Must be total: every grid maps to exactly one `Outcome`.
    fn propagate(&self, grid: &mut Grid) -> Outcome;
}

/// An ordered collection of constraints applied as one propagation pass
pub struct ConstraintSet {
    constraints: Vec<Box<dyn Constraint>>,
}

impl ConstraintSet {
    /// Create an empty constraint set
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Append a constraint. Order is fixed and deterministic, but
    /// correctness must not depend on it: the engine's fixpoint loop is
    /// what guarantees eventual consistency.
    pub fn push(&mut self, constraint: Box<dyn Constraint>) {
        self.constraints.push(constraint);
    }

    /// Number of constraints in the set
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Apply every constraint once, in order. Contradictions short-circuit;
    /// forced-cell counts accumulate.
    pub fn propagate(&self, grid: &mut Grid) -> Outcome {
        let mut result = Outcome::NoProgress;
        for constraint in &self.constraints {
            match constraint.propagate(grid) {
                Outcome::Contradiction => return Outcome::Contradiction,
                outcome => result = result.combine(outcome),
            }
        }
        result
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::new()
    }
}
