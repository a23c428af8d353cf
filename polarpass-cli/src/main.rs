use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use polarpass_cli::cli::Cli;
use polarpass_cli::config::AppConfig;
use polarpass_cli::{logging, runner};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load(&cli)?);

    // Initialize logging
    let _logging_guard = logging::init_logging(&config.log_dir, "polarpass", &config.log_level)?;

    tracing::info!("polarpass {} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Boundary latitude {:.1} deg, orbital period {} s, {} input file(s)",
        config.segmenter.boundary_lat,
        config.segmenter.orbital_period_s,
        cli.inputs.len()
    );

    let results = runner::run_batch(cli.inputs.clone(), config.clone()).await?;

    let failures = runner::emit_batch(results, &config, &mut std::io::stdout().lock())?;
    for (path, e) in &failures {
        tracing::error!("{}: {:#}", path.display(), e);
    }

    if !failures.is_empty() {
        anyhow::bail!("{} of {} file(s) failed", failures.len(), cli.inputs.len());
    }
    Ok(())
}
