//! Logging setup for the Tradebook service.
//!
//! Console output always goes through a `fmt` layer with targets, file/line and thread
//! ids. When a log directory is configured, a second non-blocking layer writes a daily
//! rolling file.

use std::str::FromStr;

use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};
use tradebook_config::LogConfig;

/// File name prefix for rolling log files.
pub const LOG_FILE_PREFIX: &str = "tradebook.log";

/// Initialize the tracing subscriber from the `[log]` configuration section.
///
/// An unparseable `level` falls back to INFO. The returned guard must be kept alive for
/// as long as file logging should keep flushing.
pub fn init_from_config(log: &LogConfig) -> Option<WorkerGuard> {
    let level = log
        .level
        .as_deref()
        .and_then(|value| Level::from_str(value).ok())
        .unwrap_or(Level::INFO);
    init_with_level(level, log.directory.as_deref())
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` directives still apply on top of `level`. Calling this twice is harmless:
/// the second call leaves the existing subscriber in place.
pub fn init_with_level(level: Level, directory: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let (file_layer, guard) = match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(file_layer)
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
    guard
}
