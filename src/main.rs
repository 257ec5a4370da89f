//! dirbench - Directory Traversal Parallelization Benchmark
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use dirbench::config::{BenchConfig, CliArgs};
use dirbench::report::{export_csv, print_header, print_results};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = BenchConfig::from_args(args).context("Invalid configuration")?;

    print_header(config.development, &config.workers, config.runs);

    // Run the benchmark matrix
    let results = dirbench::run_benchmarks(&config).context("Benchmark failed")?;

    print_results(&results);

    // Export CSV
    if config.export_csv {
        let path = export_csv(&results, &config.output_dir)
            .context("Failed to export CSV results")?;
        println!("\nResults written to {}", path.display());
        info!(path = %path.display(), "CSV export complete");
    }

    Ok(())
}

/// Configure tracing output
///
/// `RUST_LOG` overrides; `-v` raises the default level to debug.
fn setup_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
