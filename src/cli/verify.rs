use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use crate::catalog::store::InstanceCatalog;
use crate::cli::OutputFormat;
use crate::solver::engine::CostValue;
use crate::solver::{MatchingEngine, SolverKind};

#[derive(Args)]
pub struct VerifyArgs {
    /// Path to custom catalog file (defaults to the embedded catalog)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// One solver's result on one catalog entry
#[derive(Debug, serde::Serialize)]
pub struct VerifyOutcome {
    pub id: String,
    pub solver: SolverKind,
    pub expected: f64,
    pub cost: Option<CostValue>,
    pub error: Option<String>,
    pub passed: bool,
}

/// Run every applicable solver on every catalog entry.
///
/// # Errors
///
/// Returns an error if an entry does not describe a valid instance.
pub fn check_catalog(
    catalog: &InstanceCatalog,
    engine: &MatchingEngine,
) -> anyhow::Result<Vec<VerifyOutcome>> {
    let tolerance = engine.config().tolerance;
    let mut outcomes = Vec::new();

    for entry in &catalog.instances {
        let instance = entry
            .instance()
            .map_err(|e| anyhow::anyhow!("Catalog entry '{}' is invalid: {e}", entry.id))?;

        for (solver, run) in engine.cross_validate(&instance).runs {
            let outcome = match run {
                Ok(report) => VerifyOutcome {
                    id: entry.id.clone(),
                    solver,
                    expected: entry.expected_cost,
                    cost: Some(report.cost),
                    error: None,
                    passed: meets_expectation(report.cost, report.exact, entry.expected_cost, tolerance),
                },
                Err(e) => VerifyOutcome {
                    id: entry.id.clone(),
                    solver,
                    expected: entry.expected_cost,
                    cost: None,
                    error: Some(e.to_string()),
                    passed: false,
                },
            };
            if !outcome.passed {
                warn!("{} failed on '{}'", outcome.solver, outcome.id);
            }
            outcomes.push(outcome);
        }
    }

    Ok(outcomes)
}

/// Exact runs must hit the expected optimum; upper bounds must not fall below it
fn meets_expectation(cost: CostValue, exact: bool, expected: f64, tolerance: f64) -> bool {
    let expected = CostValue::Real(expected);
    cost.approx_eq(expected, tolerance) || (!exact && cost.as_f64() > expected.as_f64())
}

pub fn run(args: VerifyArgs, format: OutputFormat, engine: &MatchingEngine) -> anyhow::Result<()> {
    let catalog = if let Some(path) = &args.catalog {
        InstanceCatalog::load_from_file(path)?
    } else {
        InstanceCatalog::load_embedded()?
    };
    info!("Verifying against {} reference instances", catalog.len());

    let outcomes = check_catalog(&catalog, engine)?;

    match format {
        OutputFormat::Text => print_text_outcomes(&outcomes),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
        OutputFormat::Tsv => print_tsv_outcomes(&outcomes),
    }

    let failed = outcomes.iter().filter(|o| !o.passed).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} checks failed", outcomes.len());
    }
    Ok(())
}

fn print_text_outcomes(outcomes: &[VerifyOutcome]) {
    println!("Catalog Verification");
    println!("{}", "=".repeat(60));
    println!();

    for o in outcomes {
        let status = if o.passed { "ok" } else { "FAIL" };
        let got = match (&o.cost, &o.error) {
            (Some(cost), _) => cost.to_string(),
            (None, Some(e)) => e.clone(),
            (None, None) => String::new(),
        };
        println!(
            "  {status:<4} {:<20} {:<12} expected {} got {got}",
            o.id,
            o.solver.to_string(),
            o.expected
        );
    }

    let passed = outcomes.iter().filter(|o| o.passed).count();
    println!("\n{passed}/{} checks passed", outcomes.len());
}

fn print_tsv_outcomes(outcomes: &[VerifyOutcome]) {
    println!("id\tsolver\texpected\tcost\tpassed");
    for o in outcomes {
        let cost = o.cost.map(|c| c.to_string()).unwrap_or_default();
        println!("{}\t{}\t{}\t{cost}\t{}", o.id, o.solver, o.expected, o.passed);
    }
}
