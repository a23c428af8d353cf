use std::path::{Path, PathBuf};

use anyhow::Context;
use polarpass_core::SegmenterConfig;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// CSV column holding the sample timestamps
    #[serde(default = "default_time_column")]
    pub time_column: String,

    /// CSV column holding geographic or magnetic latitude in degrees
    #[serde(default = "default_latitude_column")]
    pub latitude_column: String,

    /// chrono format string for timestamps without an offset, read as UTC.
    /// When absent, RFC 3339 and a few ISO-like layouts are tried.
    #[serde(default)]
    pub time_format: Option<String>,
}

fn default_time_column() -> String {
    "time".to_string()
}

fn default_latitude_column() -> String {
    "latitude".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            time_column: default_time_column(),
            latitude_column: default_latitude_column(),
            time_format: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Write one file per input here instead of printing to stdout
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_format() -> OutputFormat {
    OutputFormat::Json
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default)]
    pub segmenter: SegmenterConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            segmenter: SegmenterConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    /// File values (or defaults when no file is given) overridden by flags
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        if let Some(boundary_lat) = cli.boundary_lat {
            self.segmenter.boundary_lat = boundary_lat;
        }
        if let Some(orbital_period) = cli.orbital_period {
            self.segmenter.orbital_period_s = orbital_period;
        }
        if cli.mirror_south {
            self.segmenter.mirror_southern_boundary = true;
        }
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if let Some(dir) = &cli.output_dir {
            self.output.directory = Some(dir.clone());
        }
    }
}
