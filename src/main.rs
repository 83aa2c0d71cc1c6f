//! Main CLI application for the 0h h1 solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ohhi_solver::{
    config::{BranchOrder, CliOverrides, Settings},
    ohhi::{PuzzleProblem, SolutionValidator},
    puzzle::{create_example_puzzles, load_puzzle_from_file},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ohhi_solver")]
#[command(about = "0h h1 puzzle solver using constraint propagation and search")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a 0h h1 puzzle
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Colour to try first when branching (overrides config)
        #[arg(short, long, value_parser = parse_branch_order)]
        branch_order: Option<BranchOrder>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the solution to the output directory
        #[arg(short, long)]
        save: bool,

        /// Show search statistics and branch decisions
        #[arg(long)]
        show_stats: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a solved grid against a puzzle
    Validate {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Claimed solution file
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Analyze how far propagation alone gets on a puzzle
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,
    },
}

fn parse_branch_order(s: &str) -> Result<BranchOrder, String> {
    match s {
        "red_first" => Ok(BranchOrder::RedFirst),
        "blue_first" => Ok(BranchOrder::BlueFirst),
        _ => Err(format!(
            "unknown branch order '{s}' (expected 'red_first' or 'blue_first')"
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            branch_order,
            output,
            save,
            show_stats,
            verbose,
        } => solve_command(config, puzzle, branch_order, output, save, show_stats, verbose),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Validate { puzzle, solution } => validate_command(puzzle, solution),
        Commands::Analyze { config, puzzle } => analyze_command(config, puzzle),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    branch_order: Option<BranchOrder>,
    output_dir: Option<PathBuf>,
    save: bool,
    show_stats: bool,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;

    let cli_overrides = CliOverrides {
        puzzle_file,
        branch_order,
        output_dir,
        format: None,
    };
    settings.merge_with_cli(&cli_overrides);
    if save {
        settings.output.save_solution = true;
    }

    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Puzzle file: {}", settings.input.puzzle_file.display());
        println!("  Branch order: {:?}", settings.search.branch_order);
        println!("  Duplicate detection: {:?}", settings.search.duplicate_detection);
        println!();
    }

    let problem = PuzzleProblem::new(settings.clone()).context("Failed to create puzzle problem")?;

    println!(
        "Solving {}x{} puzzle with {} givens...",
        problem.puzzle().size,
        problem.puzzle().size,
        problem.puzzle().set_count()
    );

    match problem.solve().context("Solve failed")? {
        Some(solution) => {
            println!(
                "{}",
                ColorOutput::success(&format!(
                    "Solved in {:.3}s",
                    solution.solve_time.as_secs_f64()
                ))
            );
            println!();
            println!("{}", SolutionFormatter::format_solution(&solution, show_stats));

            if verbose {
                for decision in &solution.metadata.stats.decisions {
                    println!(
                        "choosing: ({}, {}) {:?} at depth {}",
                        decision.row, decision.col, decision.colour, decision.depth
                    );
                }
            }

            if settings.output.save_solution {
                SolutionFormatter::save_solution(
                    &solution,
                    &settings.output.output_directory,
                    settings.output.format,
                )
                .context("Failed to save solution")?;
                println!(
                    "Solution saved to {}",
                    settings.output.output_directory.display()
                );
            }
        }
        None => {
            println!("{}", ColorOutput::error("No solution exists"));
            // explain when the givens themselves already break a rule
            let violations = SolutionValidator::grid_violations(problem.puzzle());
            for violation in violations {
                println!("  {violation}");
            }
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let mut default_settings = Settings::default();
        default_settings.input.puzzle_file = input_dir.join("easy_4x4.txt");
        default_settings.output.output_directory = output_dir.clone();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&input_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", input_dir.display());

    println!("{}", ColorOutput::success("Setup complete"));
    println!();
    println!("Next steps:");
    println!("1. Add your puzzles to {}", input_dir.display());
    println!("2. Run: cargo run -- solve --config {}", config_path.display());

    Ok(())
}

fn validate_command(puzzle_path: PathBuf, solution_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("Validating solution..."));

    let puzzle = load_puzzle_from_file(&puzzle_path)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;
    let solution = load_puzzle_from_file(&solution_path)
        .with_context(|| format!("Failed to load solution from {}", solution_path.display()))?;

    let result = SolutionValidator::new().validate(&puzzle, &solution);
    println!("{result}");

    if result.is_valid {
        println!("{}", ColorOutput::success("Solution is valid"));
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
    }

    Ok(())
}

fn analyze_command(config_path: PathBuf, puzzle_file: Option<PathBuf>) -> Result<()> {
    println!("{}", ColorOutput::info("Analyzing puzzle..."));

    let mut settings = load_settings(&config_path)?;
    if let Some(puzzle_file) = puzzle_file {
        settings.input.puzzle_file = puzzle_file;
    }
    settings.validate().context("Configuration validation failed")?;

    let problem = PuzzleProblem::new(settings).context("Failed to create puzzle problem")?;

    println!(
        "Puzzle ({}x{}, {} givens):",
        problem.puzzle().size,
        problem.puzzle().size,
        problem.puzzle().set_count()
    );
    println!("{}", SolutionFormatter::format_grid_with_coords(problem.puzzle()));

    let report = problem.analyze();
    println!("{report}");

    Ok(())
}
