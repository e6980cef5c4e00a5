use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogLevel;
use crate::error::{ForwarderError, Result};

/// Keeps the background log writer alive. Dropping it flushes pending lines,
/// so hold it until the process is about to exit.
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Append log lines to `path`, filtered at `level`. `RUST_LOG` overrides the
/// configured level when set.
///
/// Each line reads `<RFC 3339 timestamp>  <LEVEL> <message> <fields>`, the level
/// being one of DEBUG, WARN or ERROR for everything this crate logs.
pub fn init_logging(path: &Path, level: LogLevel) -> Result<LogGuard> {
    let (dir, file_name) = split_log_path(path)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| ForwarderError::Logging(format!("{}: {}", path.display(), e)))?;
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|e| ForwarderError::Logging(e.to_string()))?;

    Ok(LogGuard { _worker: worker })
}

/// Our own events at `level`; dependencies only when they warn or worse.
fn filter_directive(level: LogLevel) -> String {
    let deps = match level {
        LogLevel::Error => "error",
        _ => "warn",
    };
    format!("{},{}={}", deps, env!("CARGO_CRATE_NAME"), level.directive())
}

fn split_log_path(path: &Path) -> Result<(&Path, String)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            ForwarderError::Logging(format!("log file path [{}] is wrong", path.display()))
        })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, file_name.to_string()))
}
