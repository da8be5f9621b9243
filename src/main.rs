use clap::Parser;
use tracing_subscriber::EnvFilter;

use pair_solver::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("pair_solver=debug,info")
    } else {
        EnvFilter::new("pair_solver=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Solve(args) => {
            let engine = cli::load_engine(cli.config.as_deref())?;
            cli::solve::run(args, cli.format, &engine)?;
        }
        cli::Commands::Compare(args) => {
            let engine = cli::load_engine(cli.config.as_deref())?;
            cli::compare::run(args, cli.format, &engine)?;
        }
        cli::Commands::Generate(args) => {
            cli::generate::run(args, cli.format)?;
        }
        cli::Commands::Verify(args) => {
            let engine = cli::load_engine(cli.config.as_deref())?;
            cli::verify::run(args, cli.format, &engine)?;
        }
    }

    Ok(())
}
