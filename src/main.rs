use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use knights_tour::{grid::Grid, logger::DevLogger, solver::{Algorithm, SolverConfig, TourSolver}, utils};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "knights-tour", version, about = "Knight's tour solver with Warnsdorff ordering and devlogs")]
struct Cli {
    /// Board size N (the board is N x N)
    #[arg(short, long, default_value_t = 8)]
    size: usize,

    /// Start row, 0-based
    #[arg(short, long, default_value_t = 0)]
    row: usize,

    /// Start column, 0-based
    #[arg(short, long, default_value_t = 0)]
    col: usize,

    /// Backtracking strategy
    #[arg(short, long, value_enum, default_value_t = Method::Iterative)]
    algorithm: Method,

    /// Give up after entering this many cells (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    step_limit: u64,

    /// Directory for per-step devlog files
    #[arg(long)]
    devlog: Option<PathBuf>,

    /// Maximum devlogs to write (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    max_logs: usize,

    /// Emit devlogs to console with colors (echoes to console even without --devlog)
    #[arg(long)]
    color: bool,

    /// Step-by-step mode (pauses after each devlog step). Press Enter to continue.
    #[arg(long)]
    step: bool,

    /// Print the finished tour as JSON
    #[cfg(feature = "serde")]
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Method { Recursive, Iterative }

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let grid = Grid::new(cli.size).context("create board")?;
    let logger = match &cli.devlog {
        Some(dir) => DevLogger::new(dir, cli.color, cli.step, cli.max_logs)
            .with_context(|| format!("creating devlog dir {}", dir.display()))?,
        None if cli.color || cli.step => DevLogger::console(cli.color, cli.step, cli.max_logs),
        None => DevLogger::disabled(),
    };

    let algorithm = match cli.algorithm {
        Method::Recursive => Algorithm::Recursive,
        Method::Iterative => Algorithm::Iterative,
    };
    let step_limit = (cli.step_limit != 0).then_some(cli.step_limit);
    let config = SolverConfig { algorithm, step_limit };

    let mut solver = TourSolver::with_config(grid, config).with_logger(logger);
    let found = solver.solve(cli.row, cli.col).context("solve")?;
    if !found { bail!("no tour found from ({}, {}) after {} steps", cli.row, cli.col, solver.steps()) }

    #[cfg(feature = "serde")]
    {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&solver.tour()).context("encode tour")?);
            return Ok(());
        }
    }

    println!("\nTour ({} steps):\n{}", solver.steps(), utils::render_path(cli.size, solver.path()));
    println!("{}", utils::format_path(solver.path()));
    Ok(())
}
