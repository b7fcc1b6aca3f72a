//! Polyomino Tiling Solver
//!
//! Solves the calendar puzzle for any date and Dana Scott's pentomino
//! chessboard problem, printing solutions as letter grids. Solutions,
//! placements and statistics can be saved for later inspection.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

use tilecover::puzzles::{self, ChessboardVariant, Puzzle};
use tilecover::{persistence, pieces, ColumnSelection, ConfigError, PersistenceError, SolverConfig};

/// Enumerates polyomino tilings with dancing links.
#[derive(Parser)]
#[command(name = "tilecover")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    options: SolveOptions,
}

#[derive(Args)]
struct SolveOptions {
    /// Branch on the leftmost remaining column instead of the smallest one.
    #[arg(long, global = true)]
    first_available: bool,

    /// Stop after this many solutions.
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Number of solutions to print.
    #[arg(long, global = true, default_value_t = 1)]
    show: usize,

    /// Save layouts, placements, solutions and statistics under this directory.
    #[arg(long, global = true)]
    save: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the calendar puzzle for one date.
    Calendar {
        /// Month, 1-12.
        #[arg(long)]
        month: u32,
        /// Day of the month.
        #[arg(long)]
        day: u32,
    },
    /// Solve the calendar puzzle for every date of a leap year and report counts.
    CalendarAll,
    /// Solve Dana Scott's chessboard problem or one of its sub-problems.
    Chessboard {
        #[arg(long, value_enum, default_value_t = Variant::Full)]
        variant: Variant,
    },
    /// Print the layouts of the twelve pentominoes.
    Layouts,
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    /// The whole problem.
    Full,
    /// X centred on row 2, column 3.
    X23,
    /// X centred on row 2, column 4.
    X24,
    /// X centred on row 3, column 3, P mirrored.
    X33,
}

impl From<Variant> for ChessboardVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Full => Self::Full,
            Variant::X23 => Self::XAt23,
            Variant::X24 => Self::XAt24,
            Variant::X33 => Self::XAt33,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl SolveOptions {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            selection: if self.first_available {
                ColumnSelection::FirstAvailable
            } else {
                ColumnSelection::MinimumSize
            },
            max_solutions: self.limit,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Some(Command::Calendar { month, day }) => {
            puzzles::calendar(month, day).map_err(CliError::from).and_then(|puzzle| run_puzzle(&puzzle, &cli.options))
        }
        Some(Command::CalendarAll) => run_calendar_all(&cli.options),
        Some(Command::Chessboard { variant }) => run_chessboard(variant.into(), &cli.options),
        Some(Command::Layouts) => run_layouts(),
        // default: the full chessboard problem
        None => run_chessboard(ChessboardVariant::Full, &cli.options),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Solves one puzzle, prints a summary and the first solutions, and saves if asked.
fn run_puzzle(puzzle: &Puzzle, options: &SolveOptions) -> Result<(), CliError> {
    let solved = puzzle.solve(options.config())?;
    let stats = &solved.result.stats;

    println!("Solving problem: {}", puzzle.name());
    println!("Solutions found: {}", stats.solutions_found);
    println!("    Update count: {}", stats.updates);
    println!("    Time elapsed: {:.4?}", stats.elapsed);

    for (i, solution) in solved.result.solutions.iter().take(options.show).enumerate() {
        println!("\nSolution {}:", i + 1);
        print!("{}", puzzle.format_solution(&solved.cover.linfos, solution));
    }

    if let Some(dir) = &options.save {
        persistence::save(dir, puzzle, &solved)?;
        println!("\nWrote output to {}", dir.join(puzzle.name()).display());
    }

    Ok(())
}

/// Solves a chessboard variant and checks the count against the published one.
fn run_chessboard(variant: ChessboardVariant, options: &SolveOptions) -> Result<(), CliError> {
    let puzzle = puzzles::chessboard(variant)?;
    run_puzzle(&puzzle, options)?;
    if options.limit.is_none() {
        println!("Published count: {}", variant.expected_solutions());
    }
    Ok(())
}

/// Counts the solutions for every date.
fn run_calendar_all(options: &SolveOptions) -> Result<(), CliError> {
    let mut unsolvable = Vec::new();
    for (month, day) in puzzles::calendar_dates() {
        let puzzle = puzzles::calendar(month, day)?;
        let solved = puzzle.solve(options.config())?;
        let count = solved.result.solutions.len();
        println!("{}: {} solutions", puzzle.name(), count);
        if count == 0 {
            unsolvable.push(puzzle.name().to_string());
        }
        if let Some(dir) = &options.save {
            persistence::save(dir, &puzzle, &solved)?;
        }
    }
    if !unsolvable.is_empty() {
        println!("No solution for: {}", unsolvable.join(", "));
    }
    Ok(())
}

fn run_layouts() -> Result<(), CliError> {
    for (index, piece) in pieces::pentominoes()?.iter().enumerate() {
        print!("#{index} {piece}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calendar_with_global_options() {
        let cli = Cli::try_parse_from([
            "tilecover",
            "calendar",
            "--month",
            "2",
            "--day",
            "29",
            "--first-available",
            "--limit",
            "3",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::Calendar { month: 2, day: 29 })));
        let config = cli.options.config();
        assert_eq!(config.selection, ColumnSelection::FirstAvailable);
        assert_eq!(config.max_solutions, Some(3));
    }

    #[test]
    fn test_parse_chessboard_variant() {
        let cli = Cli::try_parse_from(["tilecover", "chessboard", "--variant", "x33"]).unwrap();
        let Some(Command::Chessboard { variant }) = cli.command else {
            panic!("expected chessboard command");
        };
        assert_eq!(ChessboardVariant::from(variant), ChessboardVariant::XAt33);
        assert_eq!(cli.options.config(), SolverConfig::default());
    }
}
