//! Types for engine execution results.

use std::io;

use thiserror::Error;

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code (None if the process was terminated by a signal).
    pub exit_code: Option<i32>,
    /// Full standard output, lossily decoded.
    pub stdout: String,
    /// Full standard error, lossily decoded.
    pub stderr: String,
}

impl ProcessOutput {
    /// Create an output with the given exit code and streams.
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Success iff the exit code is exactly 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Why an engine invocation failed.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The process could not be started or waited on.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The process ran and exited with something other than 0.
    #[error("Ghostscript {}: {}", exit_label(.exit_code), .stderr.trim())]
    NonZeroExit {
        exit_code: Option<i32>,
        stderr: String,
    },
}

impl EngineError {
    /// Create a spawn error.
    pub fn spawn(program: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Diagnostic payload: captured stderr, or the spawn error text.
    pub fn detail(&self) -> String {
        match self {
            EngineError::Spawn { source, .. } => source.to_string(),
            EngineError::NonZeroExit { stderr, .. } => stderr.clone(),
        }
    }

    /// Exit code, if the process ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            EngineError::Spawn { .. } => None,
            EngineError::NonZeroExit { exit_code, .. } => *exit_code,
        }
    }
}

fn exit_label(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("failed with exit code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Result type for engine invocations.
pub type EngineResult<T> = Result<T, EngineError>;
