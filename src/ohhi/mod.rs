//! 0h h1 problem definition and solution handling

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::{PropagationReport, PuzzleProblem};
pub use solution::Solution;
pub use validator::{RuleViolation, SolutionValidator, ValidationResult};
