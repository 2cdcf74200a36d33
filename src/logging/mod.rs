//! Application logging functionality
//!
//! The library only emits `tracing` events; the binary decides where they go.
//! Output goes to stderr, and with `--log-file` also to a dated file under
//! ~/.config/glyphmath/logs/.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::core::config_file::ConfigFile;
use crate::core::errors::{AppResult, FileContext};

/// Name of today's log file
pub fn log_file_name() -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d");
    format!("glyphmath-{}.log", timestamp)
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    ConfigFile::logs_dir().join(log_file_name())
}

/// Filter from RUST_LOG, else the configured directive.
fn build_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file when dropped and must be held
/// for the whole run.
pub fn init_logging(fallback_filter: &str, log_file: bool) -> AppResult<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(build_filter(fallback_filter));

    if !log_file {
        tracing_subscriber::registry().with(stderr_layer).try_init()?;
        return Ok(None);
    }

    let logs_dir = ConfigFile::logs_dir();
    let (file_writer, guard) = file_writer(&logs_dir)?;
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(build_filter(fallback_filter));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Logging to {:?}", logs_dir.join(log_file_name()));
    Ok(Some(guard))
}

fn file_writer(
    logs_dir: &Path,
) -> AppResult<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    fs::create_dir_all(logs_dir).with_file_context("create", logs_dir)?;
    let appender = tracing_appender::rolling::never(logs_dir, log_file_name());
    Ok(tracing_appender::non_blocking(appender))
}
