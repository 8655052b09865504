mod cli;
mod config;
mod csv_table;
mod normalize;
mod pipeline;
mod providers;
mod record;
mod reducer;
mod resolver;
mod table;
mod transport;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG overrides --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::from_cli(&cli)?;
    let summary = pipeline::enrich(&config)?;

    eprintln!(
        "Enriched {} rows ({} resolved, {} without data) to {}",
        summary.rows,
        summary.resolved,
        summary.rows - summary.resolved,
        config.output.display()
    );

    Ok(())
}
