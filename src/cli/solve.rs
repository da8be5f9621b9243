use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::core::instance::Instance;
use crate::parsing;
use crate::solver::engine::CostValue;
use crate::solver::{MatchingEngine, SolveReport, SolverKind};

#[derive(Args)]
pub struct SolveArgs {
    /// Instance file (.tsv, .txt, .csv, or .json)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Solver to run
    #[arg(short, long, default_value = "auto")]
    pub solver: SolverKind,

    /// Read text input as points instead of a cost matrix
    #[arg(long)]
    pub points: bool,

    /// Treat a matrix as metric in file order, allowing the interval solver beyond the bitmask limit
    #[arg(long)]
    pub metric: bool,
}

pub fn run(args: SolveArgs, format: OutputFormat, engine: &MatchingEngine) -> anyhow::Result<()> {
    let instance = parsing::load_instance(&args.input, args.points)?;
    info!(
        "Loaded {} with {} vertices from {}",
        instance.kind(),
        instance.vertex_count(),
        args.input.display()
    );

    let report = engine.solve(&instance, args.solver, args.metric)?;

    match format {
        OutputFormat::Text => print_text_report(&args, &instance, &report),
        OutputFormat::Json => print_json_report(&args, &instance, &report)?,
        OutputFormat::Tsv => print_tsv_report(&instance, &report),
    }

    Ok(())
}

/// Cost of a single pair in the instance's own numeric type
#[must_use]
pub fn pair_cost(instance: &Instance, u: usize, v: usize) -> CostValue {
    match instance {
        Instance::IntegerMatrix(m) => m.get(u, v).into(),
        Instance::RealMatrix(m) => m.get(u, v).into(),
        Instance::Points(p) => p.points()[u].distance(&p.points()[v]).into(),
    }
}

fn print_text_report(args: &SolveArgs, instance: &Instance, report: &SolveReport) {
    println!("Minimum-Weight Perfect Matching");
    println!("{}", "=".repeat(60));

    println!("\nInput: {}", args.input.display());
    println!("  Kind: {}", instance.kind());
    println!("  Vertices: {}", report.vertices);
    println!("  Solver: {}", report.solver);

    println!("\nTotal cost: {}", report.cost);
    if !report.exact {
        println!("  Upper bound: the interval order may miss the optimum on non-collinear input");
    }

    if !report.matching.is_empty() {
        println!("\nPairs:");
        if let Instance::Points(points) = instance {
            for &(u, v) in report.matching.pairs() {
                let (a, b) = (points.points()[u], points.points()[v]);
                println!(
                    "  ({}, {}) - ({}, {})  {}",
                    a.x,
                    a.y,
                    b.x,
                    b.y,
                    pair_cost(instance, u, v)
                );
            }
        } else {
            for &(u, v) in report.matching.pairs() {
                println!("  {u} - {v}  {}", pair_cost(instance, u, v));
            }
        }
    }
}

fn print_json_report(
    args: &SolveArgs,
    instance: &Instance,
    report: &SolveReport,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "input": args.input.display().to_string(),
        "kind": instance.kind(),
        "vertices": report.vertices,
        "solver": report.solver,
        "cost": report.cost,
        "exact": report.exact,
        "matching": report.matching,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_report(instance: &Instance, report: &SolveReport) {
    println!("vertex_a\tvertex_b\tcost");
    for &(u, v) in report.matching.pairs() {
        println!("{u}\t{v}\t{}", pair_cost(instance, u, v));
    }
}
