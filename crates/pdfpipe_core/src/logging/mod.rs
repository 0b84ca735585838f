//! Logging for pdfpipe.
//!
//! Two layers:
//! - `tracing` diagnostics for the process, set up once by the front end
//!   (stderr, optionally plus a daily-rolling file)
//! - a [`JobLogger`] per pipeline run, writing the `log_<timestamp>.txt`
//!   file that records every Ghostscript command and its output
//!
//! # Example
//!
//! ```no_run
//! use pdfpipe_core::logging::{JobLogger, LogConfig};
//!
//! let logger = JobLogger::new("logs", LogConfig::default(), None).unwrap();
//!
//! logger.phase("Merge");
//! logger.command("gs -dBATCH -dNOPAUSE ...");
//! logger.success("Merge OK → merged.pdf");
//! ```

mod job_logger;
mod types;

use std::path::Path;

pub use job_logger::{JobLogger, JobLoggerBuilder};
pub use types::{LineCallback, LogConfig, LogLevel, MessagePrefix};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix of the daily diagnostics file.
const DIAGNOSTICS_FILE: &str = "pdfpipe.log";

/// `RUST_LOG` if set, otherwise `default_level`.
fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.filter_directive()))
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Later calls are ignored.
pub fn init_tracing(default_level: LogLevel) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter(default_level))
        .try_init();
}

/// Install the global tracing subscriber with an extra daily-rolling file
/// in `logs_dir`.
///
/// Keep the returned guard alive until exit so buffered lines reach the
/// file. Falls back to stderr only if `logs_dir` cannot be created.
pub fn init_tracing_with_file(default_level: LogLevel, logs_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(logs_dir) {
        init_tracing(default_level);
        tracing::warn!("Cannot create {}: {}", logs_dir.display(), e);
        return None;
    }

    let appender = tracing_appender::rolling::daily(logs_dir, DIAGNOSTICS_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(env_filter(default_level))
        .try_init();

    Some(guard)
}

/// Test subscriber: warnings and above, captured by the test harness.
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
