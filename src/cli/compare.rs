use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::parsing;
use crate::solver::engine::CrossValidation;
use crate::solver::MatchingEngine;

#[derive(Args)]
pub struct CompareArgs {
    /// Instance file (.tsv, .txt, .csv, or .json)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Read text input as points instead of a cost matrix
    #[arg(long)]
    pub points: bool,
}

pub fn run(args: CompareArgs, format: OutputFormat, engine: &MatchingEngine) -> anyhow::Result<()> {
    let instance = parsing::load_instance(&args.input, args.points)?;
    info!(
        "Cross-validating {} with {} vertices",
        instance.kind(),
        instance.vertex_count()
    );

    let validation = engine.cross_validate(&instance);
    if validation.runs.is_empty() {
        anyhow::bail!(
            "No solver applies to {} vertices; raise the limits with --config",
            instance.vertex_count()
        );
    }

    let tolerance = engine.config().tolerance;
    let agree = validation.agree(tolerance);

    match format {
        OutputFormat::Text => print_text_comparison(&args, &validation, agree),
        OutputFormat::Json => print_json_comparison(&args, &validation, agree)?,
        OutputFormat::Tsv => print_tsv_comparison(&validation),
    }

    if validation.runs.iter().all(|(_, run)| run.is_err()) {
        anyhow::bail!("No solver produced a matching for {}", args.input.display());
    }
    if !agree {
        anyhow::bail!("Solvers disagree on {}", args.input.display());
    }
    Ok(())
}

fn print_text_comparison(args: &CompareArgs, validation: &CrossValidation, agree: bool) {
    println!("Solver Comparison");
    println!("{}", "=".repeat(60));
    println!("\nInput: {}", args.input.display());
    println!();

    for (kind, run) in &validation.runs {
        match run {
            Ok(report) if report.exact => println!("  {:<12} {}", kind.to_string(), report.cost),
            Ok(report) => println!("  {:<12} {} (upper bound)", kind.to_string(), report.cost),
            Err(e) => println!("  {:<12} failed: {e}", kind.to_string()),
        }
    }

    println!();
    if validation.runs.iter().all(|(_, run)| run.is_err()) {
        println!("No solver succeeded.");
    } else if agree {
        println!("All successful solvers agree.");
    } else {
        println!("Solvers DISAGREE.");
    }
}

fn print_json_comparison(
    args: &CompareArgs,
    validation: &CrossValidation,
    agree: bool,
) -> anyhow::Result<()> {
    let runs: Vec<_> = validation
        .runs
        .iter()
        .map(|(kind, run)| match run {
            Ok(report) => serde_json::json!({
                "solver": kind,
                "cost": report.cost,
                "exact": report.exact,
                "matching": report.matching,
            }),
            Err(e) => serde_json::json!({
                "solver": kind,
                "error": e.to_string(),
            }),
        })
        .collect();

    let output = serde_json::json!({
        "input": args.input.display().to_string(),
        "agree": agree,
        "runs": runs,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_comparison(validation: &CrossValidation) {
    println!("solver\tcost\texact\terror");
    for (kind, run) in &validation.runs {
        match run {
            Ok(report) => println!("{kind}\t{}\t{}\t", report.cost, report.exact),
            Err(e) => println!("{kind}\t\t\t{e}"),
        }
    }
}
