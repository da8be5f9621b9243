use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use crate::cli::OutputFormat;
use crate::core::instance::Instance;
use crate::generate::{collinear_points, random_cost_matrix, random_points, seeded_rng};
use crate::parsing::json::InstanceData;
use crate::parsing::matrix::format_matrix;
use crate::parsing::points::format_points;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum InstanceKind {
    /// Symmetric integer cost matrix
    Matrix,
    /// Points scattered over a square
    Points,
    /// Points on the x axis
    Line,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Shape of the instance
    #[arg(value_enum)]
    pub kind: InstanceKind,

    /// Number of vertices
    #[arg(short = 'n', long, required = true)]
    pub size: usize,

    /// Random seed
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Largest cost, coordinate, or gap between points on a line
    #[arg(long, default_value = "100")]
    pub max: u32,

    /// Write to this file instead of stdout (.json writes JSON, .csv writes commas)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: GenerateArgs, format: OutputFormat) -> anyhow::Result<()> {
    if let Some(message) = crate::utils::validation::check_vertex_limit(args.size.saturating_sub(1)) {
        anyhow::bail!(message);
    }

    let mut rng = seeded_rng(args.seed);
    let instance = match args.kind {
        InstanceKind::Matrix => {
            Instance::IntegerMatrix(random_cost_matrix(args.size, i64::from(args.max), &mut rng)?)
        }
        InstanceKind::Points => {
            Instance::Points(random_points(args.size, f64::from(args.max), &mut rng)?)
        }
        InstanceKind::Line => Instance::Points(collinear_points(args.size, args.max, &mut rng)?),
    };
    info!(
        "Generated {} with {} vertices (seed {})",
        instance.kind(),
        instance.vertex_count(),
        args.seed
    );

    let ext = args
        .output
        .as_ref()
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let delimiter = if ext.as_deref() == Some("csv") { ',' } else { '\t' };

    let content = if matches!(format, OutputFormat::Json) || ext.as_deref() == Some("json") {
        let mut json = serde_json::to_string_pretty(&InstanceData::from(&instance))?;
        json.push('\n');
        json
    } else {
        render_text(&instance, delimiter)
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, content)?;
            info!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }

    Ok(())
}

fn render_text(instance: &Instance, delimiter: char) -> String {
    match instance {
        Instance::IntegerMatrix(m) => format_matrix(m, delimiter),
        Instance::RealMatrix(m) => format_matrix(m, delimiter),
        Instance::Points(p) => format_points(p, delimiter),
    }
}
