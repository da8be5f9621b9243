//! Command-line interface for pair-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **solve**: Find a minimum-weight perfect matching for one instance
//! - **compare**: Run every applicable solver on one instance and check they agree
//! - **generate**: Write a seeded random instance
//! - **verify**: Check every solver against the catalog of reference instances
//!
//! ## Usage
//!
//! ```text
//! # Solve a cost matrix with the automatically chosen solver
//! pair-solver solve costs.tsv
//!
//! # Treat a text file as planar points
//! pair-solver solve points.csv --points
//!
//! # JSON output for scripting
//! pair-solver solve costs.tsv --format json
//!
//! # Cross-check solvers on a random instance
//! pair-solver generate matrix --size 10 --seed 42 --output costs.tsv
//! pair-solver compare costs.tsv
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::solver::{MatchingEngine, SolverConfig};

pub mod compare;
pub mod generate;
pub mod solve;
pub mod verify;

#[derive(Parser)]
#[command(name = "pair-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Exact minimum-weight perfect matching on small or ordered instances")]
#[command(
    long_about = "pair-solver pairs up an even number of vertices so that the total pairing cost is as small as possible.\n\nIt provides:\n- A brute-force enumerator for tiny inputs\n- An exact bitmask dynamic program for up to about two dozen vertices\n- An interval dynamic program for points in canonical order\n- Cross-validation of all applicable solvers on the same input"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// JSON file overriding solver limits and tolerance
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve a single instance
    Solve(solve::SolveArgs),

    /// Run every applicable solver and compare their costs
    Compare(compare::CompareArgs),

    /// Generate a random instance
    Generate(generate::GenerateArgs),

    /// Check solvers against the reference catalog
    Verify(verify::VerifyArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Build the engine from `--config`, or from defaults when none is given.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn load_engine(config: Option<&Path>) -> anyhow::Result<MatchingEngine> {
    let config = match config {
        Some(path) => SolverConfig::load_from_file(path)?,
        None => SolverConfig::default(),
    };
    debug!(?config, "solver configuration");
    Ok(MatchingEngine::new(config))
}
