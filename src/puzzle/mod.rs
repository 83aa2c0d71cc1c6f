//! 0h h1 puzzle core functionality

pub mod grid;
pub mod io;
pub mod rules;

pub use grid::{Cell, ForceResult, Grid, PuzzleError};
pub use io::{
    create_example_puzzles, load_puzzle_from_file, parse_puzzle_from_string, save_puzzle_to_file,
};
pub use rules::{LineKind, OhHiRules};
