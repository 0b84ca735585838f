//! Per-run log file with optional console echo.
//!
//! A `JobLogger` owns one `log_<date>_<time>.txt` file. Every line goes to
//! the file; lines can also be echoed through a callback. Ghostscript
//! output is additionally kept in a bounded tail so the last lines can be
//! shown when an invocation fails in compact mode.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use crate::command::format_args_pretty;

use super::types::{LineCallback, LogConfig, LogLevel, MessagePrefix};

/// File and echo targets, locked together so both see lines in one order.
struct Sinks {
    file: Option<BufWriter<File>>,
    echo: Option<LineCallback>,
}

impl Sinks {
    fn write(&mut self, line: &str, echo: bool) {
        if let Some(file) = self.file.as_mut() {
            let _ = writeln!(file, "{}", line);
        }
        if echo {
            self.echo(line);
        }
    }

    fn echo(&self, line: &str) {
        if let Some(callback) = self.echo.as_ref() {
            callback(line);
        }
    }
}

/// Last N lines of Ghostscript output.
struct Tail {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Tail {
    fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, line: &str) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
    }
}

/// Log sink for one pipeline run.
pub struct JobLogger {
    log_path: PathBuf,
    config: LogConfig,
    sinks: Mutex<Sinks>,
    tail: Mutex<Tail>,
}

impl JobLogger {
    /// Open a new run log in `log_dir` (created if missing).
    ///
    /// The file is opened in append mode: two runs started in the same
    /// second share one file.
    pub fn new(
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        line_callback: Option<LineCallback>,
    ) -> io::Result<Self> {
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;

        let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let log_path = log_dir.join(format!("log_{}.txt", stamp));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            log_path,
            sinks: Mutex::new(Sinks {
                file: Some(BufWriter::new(file)),
                echo: line_callback,
            }),
            tail: Mutex::new(Tail::new(config.error_tail)),
            config,
        })
    }

    /// Path of the log file.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Write `message` if `level` passes the configured threshold.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level >= self.config.level {
            let line = self.stamp(message);
            self.sinks.lock().write(&line, true);
        }
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &MessagePrefix::Error.format(message));
    }

    /// Write `message` whatever the level threshold.
    fn record(&self, message: &str) {
        let line = self.stamp(message);
        self.sinks.lock().write(&line, true);
    }

    /// `$ <command line>`. Bypasses the level filter.
    pub fn command(&self, command: &str) {
        self.record(&MessagePrefix::Command.format(command));
    }

    /// One argument per line, only with `show_command_pretty`. Bypasses the
    /// level filter.
    pub fn arguments(&self, argv: &[String]) {
        if self.config.show_command_pretty {
            self.record(&format_args_pretty(argv));
        }
    }

    /// `--- <name> ---` framing around Ghostscript output. Bypasses the
    /// level filter so output is never left without its header.
    pub fn output_section(&self, name: &str) {
        self.record(&MessagePrefix::Section.format(name));
    }

    /// `=== <name> ===`
    pub fn phase(&self, name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Phase.format(name));
    }

    /// `--- <name> ---`
    pub fn section(&self, name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Section.format(name));
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Success.format(message));
    }

    /// Record one line of Ghostscript output.
    ///
    /// Bypasses the level filter. Echoed only outside compact mode.
    pub fn output_line(&self, line: &str, is_stderr: bool) {
        self.tail.lock().push(line);

        let text = if is_stderr {
            format!("[stderr] {}", line)
        } else {
            line.to_string()
        };
        let line = self.stamp(&text);
        self.sinks.lock().write(&line, !self.config.compact);
    }

    /// Echo the tail after a failure.
    ///
    /// Only needed in compact mode; otherwise the lines were echoed as they
    /// arrived. The file already holds them either way.
    pub fn show_tail(&self, header: &str) {
        if !self.config.compact {
            return;
        }
        let tail = self.tail.lock();
        if tail.lines.is_empty() {
            return;
        }

        let sinks = self.sinks.lock();
        sinks.echo(&self.stamp(&format!("[{}/tail]", header)));
        for line in &tail.lines {
            sinks.echo(&self.stamp(line));
        }
    }

    /// Forget the tail (called before each invocation).
    pub fn clear_tail(&self) {
        self.tail.lock().lines.clear();
    }

    /// Copy of the tail.
    pub fn get_tail(&self) -> Vec<String> {
        self.tail.lock().lines.iter().cloned().collect()
    }

    pub fn flush(&self) {
        if let Some(file) = self.sinks.lock().file.as_mut() {
            let _ = file.flush();
        }
    }

    /// Flush and release the file. Later lines only reach the callback.
    pub fn close(&self) {
        let mut sinks = self.sinks.lock();
        if let Some(mut file) = sinks.file.take() {
            let _ = file.flush();
        }
    }

    fn stamp(&self, message: &str) -> String {
        if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
        } else {
            message.to_string()
        }
    }
}

impl Drop for JobLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Builder for [`JobLogger`].
pub struct JobLoggerBuilder {
    log_dir: PathBuf,
    config: LogConfig,
    line_callback: Option<LineCallback>,
}

impl JobLoggerBuilder {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            config: LogConfig::default(),
            line_callback: None,
        }
    }

    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.config.compact = compact;
        self
    }

    pub fn line_callback(mut self, callback: LineCallback) -> Self {
        self.line_callback = Some(callback);
        self
    }

    pub fn build(self) -> io::Result<JobLogger> {
        JobLogger::new(self.log_dir, self.config, self.line_callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn echo_counter() -> (Arc<Mutex<Vec<String>>>, LineCallback) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: LineCallback = Box::new(move |line| sink.lock().push(line.to_string()));
        (seen, callback)
    }

    #[test]
    fn log_file_is_named_by_start_time() {
        let dir = tempdir().unwrap();
        let logger = JobLogger::new(dir.path(), LogConfig::default(), None).unwrap();

        assert!(logger.log_path().exists());
        let name = logger.log_path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("log_") && name.ends_with(".txt"));
        // log_YYYY-MM-DD_HH-MM-SS.txt
        assert_eq!(name.len(), "log_2024-01-01_00-00-00.txt".len());
    }

    #[test]
    fn lines_reach_file_and_callback() {
        let dir = tempdir().unwrap();
        let (seen, callback) = echo_counter();
        let logger = JobLoggerBuilder::new(dir.path())
            .line_callback(callback)
            .build()
            .unwrap();

        logger.phase("Merge");
        logger.success("Merge OK → merged.pdf");
        logger.flush();

        assert_eq!(seen.lock().len(), 2);
        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("=== Merge ==="));
        assert!(content.contains("[SUCCESS] Merge OK → merged.pdf"));
    }

    #[test]
    fn compact_mode_keeps_output_in_file_only() {
        let dir = tempdir().unwrap();
        let (seen, callback) = echo_counter();
        let logger = JobLoggerBuilder::new(dir.path())
            .compact(true)
            .line_callback(callback)
            .build()
            .unwrap();

        logger.output_line("GPL Ghostscript 10.02", false);
        logger.flush();

        assert!(seen.lock().is_empty());
        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("GPL Ghostscript 10.02"));
    }

    #[test]
    fn debug_preset_echoes_output() {
        let dir = tempdir().unwrap();
        let (seen, callback) = echo_counter();
        let logger = JobLogger::new(dir.path(), LogConfig::debug(), Some(callback)).unwrap();

        logger.output_line("Page 1", false);
        logger.debug("detail");

        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn output_ignores_level_filter() {
        let dir = tempdir().unwrap();
        let logger = JobLoggerBuilder::new(dir.path())
            .level(LogLevel::Error)
            .build()
            .unwrap();

        logger.info("hidden");
        logger.output_line("engine said this", true);
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(!content.contains("hidden"));
        assert!(content.contains("[stderr] engine said this"));
    }

    #[test]
    fn tail_keeps_last_lines() {
        let dir = tempdir().unwrap();
        let config = LogConfig {
            error_tail: 5,
            ..LogConfig::default()
        };
        let logger = JobLogger::new(dir.path(), config, None).unwrap();

        for i in 0..10 {
            logger.output_line(&format!("Line {}", i), false);
        }

        let tail = logger.get_tail();
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0], "Line 5");
        assert_eq!(tail[4], "Line 9");

        logger.clear_tail();
        assert!(logger.get_tail().is_empty());
    }

    #[test]
    fn show_tail_echoes_in_compact_mode() {
        let dir = tempdir().unwrap();
        let (seen, callback) = echo_counter();
        let config = LogConfig {
            show_timestamps: false,
            ..LogConfig::default()
        };
        let logger = JobLogger::new(dir.path(), config, Some(callback)).unwrap();

        logger.output_line("Error: /undefined in --run--", true);
        logger.show_tail("ghostscript");

        assert_eq!(
            *seen.lock(),
            vec![
                "[ghostscript/tail]".to_string(),
                "Error: /undefined in --run--".to_string()
            ]
        );
    }

    #[test]
    fn pretty_arguments_only_when_enabled() {
        let dir = tempdir().unwrap();
        let config = LogConfig {
            show_command_pretty: true,
            show_timestamps: false,
            ..LogConfig::default()
        };
        let logger = JobLogger::new(dir.path(), config, None).unwrap();

        logger.arguments(&["gs".to_string(), "-dBATCH".to_string()]);
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("gs \\\n  -dBATCH"));
    }
}
