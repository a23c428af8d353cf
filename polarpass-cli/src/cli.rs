use std::path::PathBuf;

use clap::Parser;

use crate::config::OutputFormat;

/// Split satellite latitude trajectories into polar passes
#[derive(Debug, Parser)]
#[command(name = "polarpass", version)]
pub struct Cli {
    /// Trajectory CSV files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Boundary latitude in degrees (overrides the config file)
    #[arg(long, allow_hyphen_values = true)]
    pub boundary_lat: Option<f64>,

    /// Approximate orbital period in seconds (overrides the config file)
    #[arg(long)]
    pub orbital_period: Option<f64>,

    /// Detect southern passes against -|boundary_lat|
    #[arg(long)]
    pub mirror_south: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write one result file per input into this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    pub log_level: Option<String>,
}
