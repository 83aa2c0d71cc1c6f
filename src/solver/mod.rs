//! Constraint propagation and depth-first search components

pub mod constraint;
pub mod constraints;
pub mod engine;

pub use constraint::{Constraint, ConstraintSet, Outcome};
pub use constraints::{ohhi_constraint_set, BalancedCountRule, NoDuplicateLineRule, NoTripleRule};
pub use engine::{BranchDecision, SearchEngine, SearchStats, SolveResult};
