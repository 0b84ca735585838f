//! Run-log settings and line markers.

use serde::{Deserialize, Serialize};

/// Severity threshold for run-log lines and the tracing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// How a run log writes and echoes lines.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Lines below this level are dropped (Ghostscript output excepted).
    pub level: LogLevel,
    /// Keep Ghostscript output off the console; it still reaches the file
    /// and the failure tail.
    pub compact: bool,
    /// How many Ghostscript output lines the failure tail keeps.
    pub error_tail: usize,
    /// Prefix lines with `[HH:MM:SS]`.
    pub show_timestamps: bool,
    /// Log each Ghostscript argument on its own line as well.
    pub show_command_pretty: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            compact: true,
            error_tail: 20,
            show_timestamps: true,
            show_command_pretty: false,
        }
    }
}

impl LogConfig {
    /// Everything on the console, with a longer failure tail.
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
            compact: false,
            error_tail: 50,
            show_timestamps: true,
            show_command_pretty: true,
        }
    }
}

/// Receives every formatted line the run log echoes.
pub type LineCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Marker put around or before a run-log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePrefix {
    /// `$ gs ...`
    Command,
    /// `=== Merge ===`
    Phase,
    /// `--- STDERR ---`
    Section,
    Success,
    Warning,
    Error,
}

impl MessagePrefix {
    /// Apply the marker to `message`.
    pub fn format(&self, message: &str) -> String {
        let (open, close) = match self {
            MessagePrefix::Command => ("$ ", ""),
            MessagePrefix::Phase => ("=== ", " ==="),
            MessagePrefix::Section => ("--- ", " ---"),
            MessagePrefix::Success => ("[SUCCESS] ", ""),
            MessagePrefix::Warning => ("[WARNING] ", ""),
            MessagePrefix::Error => ("[ERROR] ", ""),
        };
        format!("{}{}{}", open, message, close)
    }
}
