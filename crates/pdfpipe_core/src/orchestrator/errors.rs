//! Error types for the orchestrator pipeline.
//!
//! Errors carry context that chains through layers:
//! Run → Stage → Engine → Detail

use thiserror::Error;

use crate::models::StageKind;
use crate::runner::EngineError;

/// Top-level pipeline error.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The run could not start (engine or PDF/A definition missing).
    #[error("Pre-flight check failed: {message}")]
    Preflight { message: String },

    /// A stage failed; later stages were not attempted.
    #[error("{stage} failed: {source}")]
    StageFailed {
        stage: StageKind,
        #[source]
        source: StepError,
    },

    /// The run was cancelled before a stage started.
    #[error("Pipeline cancelled before {stage}")]
    Cancelled { stage: StageKind },
}

impl PipelineError {
    /// Create a pre-flight error.
    pub fn preflight(message: impl Into<String>) -> Self {
        Self::Preflight {
            message: message.into(),
        }
    }

    /// Create a stage failed error.
    pub fn stage_failed(stage: StageKind, source: StepError) -> Self {
        Self::StageFailed { stage, source }
    }

    /// Create a cancelled error.
    pub fn cancelled(stage: StageKind) -> Self {
        Self::Cancelled { stage }
    }

    /// Stage the error is attributed to, if any.
    pub fn stage(&self) -> Option<StageKind> {
        match self {
            PipelineError::Preflight { .. } => None,
            PipelineError::StageFailed { stage, .. } | PipelineError::Cancelled { stage } => {
                Some(*stage)
            }
        }
    }
}

/// Error from a single stage.
#[derive(Error, Debug)]
pub enum StepError {
    /// Missing or contradictory stage configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Nothing to work on.
    #[error("No input: {0}")]
    NoInput(String),

    /// Ghostscript could not be started or exited with an error.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl StepError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a no-input error.
    pub fn no_input(message: impl Into<String>) -> Self {
        Self::NoInput(message.into())
    }

    /// Text recorded as the stage's error detail.
    pub fn detail(&self) -> String {
        match self {
            StepError::Engine(e) => e.detail(),
            other => other.to_string(),
        }
    }
}

/// Result type for stage operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
