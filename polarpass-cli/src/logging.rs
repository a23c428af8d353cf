use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use anyhow::Context;
use tracing_subscriber::{fmt, filter::Directive, prelude::*, EnvFilter};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

/// Log files from earlier runs older than this are deleted at startup
const LOG_RETENTION: Duration = Duration::from_secs(60 * 60 * 24 * 3);

/// Keeps the file writer flushing until dropped
#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

/// Map anything other than a known level name to "info"
pub fn normalize_level(level: &str) -> &str {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => level,
        _ => "info",
    }
}

/// Console logs go to stderr so stdout stays free for results.
pub fn init_logging(log_dir: impl AsRef<Path>, prefix: &str, level: &str) -> anyhow::Result<LoggerGuard> {
    let log_dir = log_dir.as_ref().to_path_buf();

    let normalized = normalize_level(level);
    let builder = EnvFilter::builder()
        .with_default_directive(normalized.parse::<Directive>().context("Invalid log level directive")?);

    let console_filter = builder.clone().parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());
    let file_filter = builder.parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory '{}'", log_dir.display()))?;
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create file appender")?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(file_filter);
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if normalized != level {
        tracing::warn!("Invalid log level '{}', defaulting to 'info'", level);
    }

    match prune_stale_logs(&log_dir, prefix, LOG_RETENTION) {
        Ok(0) => {}
        Ok(removed) => tracing::debug!("Pruned {} log file(s) older than {:?}", removed, LOG_RETENTION),
        Err(e) => tracing::warn!("Failed to prune old logs in '{}': {}", log_dir.display(), e),
    }

    Ok(LoggerGuard(guard))
}

fn is_own_log(file_name: &str, prefix: &str) -> bool {
    file_name.starts_with(prefix) && file_name.ends_with(".log")
}

/// Delete this tool's log files last modified more than `max_age` ago,
/// returning how many were removed
fn prune_stale_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<usize> {
    let cutoff = SystemTime::now().checked_sub(max_age).unwrap_or(SystemTime::UNIX_EPOCH);

    let stale: Vec<PathBuf> = fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_own_log(&entry.file_name().to_string_lossy(), prefix))
        .filter(|entry| {
            entry
                .metadata()
                .and_then(|meta| meta.modified())
                .is_ok_and(|modified| modified < cutoff)
        })
        .map(|entry| entry.path())
        .collect();

    for path in &stale {
        fs::remove_file(path)?;
    }
    Ok(stale.len())
}
