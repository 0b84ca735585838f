//! Core types for the orchestrator pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::logging::JobLogger;
use crate::models::{MergeInputItem, PipelineConfig, StageKind};
use crate::picker::{FilePicker, NoFilePicker};
use crate::runner::ProcessRunner;

use super::errors::{StepError, StepResult};

/// Read-only context passed to pipeline steps.
///
/// Contains the run configuration and the collaborators steps use. Mutable
/// state goes in `RunState`.
pub struct Context {
    /// Normalized pipeline configuration.
    pub config: PipelineConfig,
    /// Per-run logger.
    pub logger: Arc<JobLogger>,
    /// Engine process runner.
    runner: ProcessRunner,
    /// Source of merge inputs when the configuration lists none.
    picker: Box<dyn FilePicker>,
}

impl Context {
    /// Create a context that runs real processes and has no file picker.
    pub fn new(config: PipelineConfig, logger: Arc<JobLogger>) -> Self {
        Self {
            config,
            logger,
            runner: ProcessRunner::system(),
            picker: Box::new(NoFilePicker),
        }
    }

    /// Replace the process runner.
    pub fn with_runner(mut self, runner: ProcessRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Replace the file picker.
    pub fn with_file_picker(mut self, picker: impl FilePicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Get the process runner.
    pub fn runner(&self) -> &ProcessRunner {
        &self.runner
    }

    /// Ask the file picker for inputs.
    pub fn pick_files(&self, title: &str) -> Vec<PathBuf> {
        self.picker.pick_files(title)
    }
}

/// Resolved Ghostscript install, checked before any stage runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineInstall {
    /// Ghostscript executable.
    pub engine_path: PathBuf,
    /// `PDFA_def.ps` from the same install.
    pub archive_definition: PathBuf,
}

/// Lifecycle of one stage within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Skipped,
    Pending,
    Validating,
    Running,
    Succeeded,
    Failed,
}

/// Result of an executed stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl StageResult {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error_detail: None,
        }
    }

    pub fn failed(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error_detail: Some(detail.into()),
        }
    }
}

/// Per-stage record kept in the run state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageRecord {
    pub kind: StageKind,
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<StageResult>,
    /// Engine argv, once the stage built it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

impl StageRecord {
    fn new(kind: StageKind) -> Self {
        Self {
            kind,
            status: StageStatus::Pending,
            result: None,
            command: None,
        }
    }
}

/// Mutable run state that accumulates results from pipeline steps.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunState {
    /// When the run started.
    pub started_at: Option<String>,
    /// Engine install, set by the pre-flight check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineInstall>,
    /// Current working file: output of the last successful stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    /// Success messages in stage order.
    pub messages: Vec<String>,
    /// One record per stage the pipeline visited.
    pub stages: Vec<StageRecord>,
    /// Inputs the merge stage settled on during validation.
    #[serde(skip)]
    pub merge_inputs: Vec<MergeInputItem>,
}

impl RunState {
    /// Create an empty run state.
    pub fn new() -> Self {
        Self {
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// The resolved engine install.
    pub fn install(&self) -> StepResult<&EngineInstall> {
        self.engine
            .as_ref()
            .ok_or_else(|| StepError::configuration("Ghostscript path is not resolved"))
    }

    /// The current artifact, required by every stage after the first.
    pub fn require_artifact(&self, stage: StageKind) -> StepResult<&Path> {
        self.artifact.as_deref().ok_or_else(|| {
            StepError::no_input(format!(
                "{} has no input file; enable an earlier stage that produces one",
                stage
            ))
        })
    }

    /// Record for `kind`, created on first access.
    pub fn record_mut(&mut self, kind: StageKind) -> &mut StageRecord {
        let index = match self.stages.iter().position(|r| r.kind == kind) {
            Some(index) => index,
            None => {
                self.stages.push(StageRecord::new(kind));
                self.stages.len() - 1
            }
        };
        &mut self.stages[index]
    }

    /// Record for `kind`, if the pipeline visited it.
    pub fn record(&self, kind: StageKind) -> Option<&StageRecord> {
        self.stages.iter().find(|r| r.kind == kind)
    }

    /// Move a stage to a new status.
    pub fn set_status(&mut self, kind: StageKind, status: StageStatus) {
        self.record_mut(kind).status = status;
    }

    /// Status of a stage (Pending if not visited yet).
    pub fn status(&self, kind: StageKind) -> StageStatus {
        self.record(kind)
            .map(|r| r.status)
            .unwrap_or(StageStatus::Pending)
    }
}

/// What a successful stage produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// File the stage wrote; becomes the new artifact.
    pub output: PathBuf,
    /// Success message (`"<Stage> OK → <output>"`).
    pub message: String,
}

impl StepOutcome {
    pub fn new(kind: StageKind, output: &Path) -> Self {
        Self {
            output: output.to_path_buf(),
            message: format!("{} OK → {}", kind, output.display()),
        }
    }
}

/// Final report of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Success messages in stage order (empty if nothing was enabled).
    pub messages: Vec<String>,
    /// Final artifact, if any stage ran.
    pub artifact: Option<PathBuf>,
}
