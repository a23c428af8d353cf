//! Batch segmentation of trajectory files

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use polarpass_core::PassSegmenter;
use tokio::task::JoinSet;

use crate::config::{AppConfig, OutputFormat};
use crate::report::FileReport;
use crate::trajectory::Trajectory;

/// Read and segment a single trajectory file
pub fn process_file(path: &Path, segmenter: &PassSegmenter, config: &AppConfig) -> Result<FileReport> {
    let trajectory = Trajectory::from_path(path, &config.input)?;
    tracing::info!("Segmenting {} ({} samples)", path.display(), trajectory.len());

    let segmentation = segmenter
        .segment(&trajectory.times, &trajectory.latitude)
        .with_context(|| format!("Failed to segment '{}'", path.display()))?;

    Ok(FileReport::new(
        path.display().to_string(),
        trajectory.len(),
        segmenter.config().boundary_lat,
        &segmentation,
    ))
}

/// Segment every file on the blocking pool. Results come back in input
/// order; one failing file does not stop the others.
pub async fn run_batch(paths: Vec<PathBuf>, config: Arc<AppConfig>) -> Result<Vec<(PathBuf, Result<FileReport>)>> {
    ensure_distinct_targets(&paths, &config)?;
    let segmenter = Arc::new(PassSegmenter::new(config.segmenter.clone())?);

    let mut tasks = JoinSet::new();
    for (order, path) in paths.into_iter().enumerate() {
        let segmenter = segmenter.clone();
        let config = config.clone();
        tasks.spawn_blocking(move || {
            let result = process_file(&path, &segmenter, &config);
            (order, path, result)
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        results.push(joined.context("Segmentation task panicked")?);
    }
    results.sort_by_key(|(order, _, _)| *order);

    Ok(results.into_iter().map(|(_, path, result)| (path, result)).collect())
}

/// File a report for `source` is written to inside `dir`
pub fn output_target(source: &Path, dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "trajectory".to_string());
    let extension = match format {
        OutputFormat::Json => "passes.json",
        OutputFormat::Text => "passes.txt",
    };
    dir.join(format!("{}.{}", stem, extension))
}

/// Refuse a batch in which two inputs would write the same output file
pub fn ensure_distinct_targets(paths: &[PathBuf], config: &AppConfig) -> Result<()> {
    let Some(dir) = &config.output.directory else {
        return Ok(());
    };

    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    for path in paths {
        let target = output_target(path, dir, config.output.format);
        if let Some(first) = claimed.insert(target.clone(), path.as_path()) {
            bail!(
                "'{}' and '{}' would both write '{}'",
                first.display(),
                path.display(),
                target.display()
            );
        }
    }
    Ok(())
}

fn write_report(report: &FileReport, source: &Path, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    let body = match format {
        OutputFormat::Json => report.to_json().context("Failed to serialize report")?,
        OutputFormat::Text => report.render_text(),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;
    let target = output_target(source, dir, format);
    std::fs::write(&target, body)
        .with_context(|| format!("Failed to write '{}'", target.display()))?;
    Ok(target)
}

/// Deliver the batch results and hand back the files that failed.
///
/// With an output directory every report gets its own file. Otherwise the
/// reports go to `out`: one JSON array for the whole batch, or the text
/// blocks one after another.
pub fn emit_batch<W: Write>(
    results: Vec<(PathBuf, Result<FileReport>)>,
    config: &AppConfig,
    out: &mut W,
) -> Result<Vec<(PathBuf, anyhow::Error)>> {
    let mut failures = Vec::new();
    let mut reports = Vec::new();

    for (path, result) in results {
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                failures.push((path, e));
                continue;
            }
        };
        match &config.output.directory {
            Some(dir) => match write_report(&report, &path, dir, config.output.format) {
                Ok(target) => tracing::info!("Wrote {}", target.display()),
                Err(e) => failures.push((path, e)),
            },
            None => reports.push(report),
        }
    }

    if config.output.directory.is_none() {
        match config.output.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &reports).context("Failed to serialize reports")?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                for report in &reports {
                    writeln!(out, "{}", report.render_text())?;
                }
            }
        }
    }

    Ok(failures)
}
