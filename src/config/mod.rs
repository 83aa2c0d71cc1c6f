//! Configuration management for the 0h h1 solver

pub mod settings;

pub use settings::{
    BranchOrder, CliOverrides, DuplicateDetection, InputConfig, OutputConfig, OutputFormat,
    SearchConfig, Settings,
};
