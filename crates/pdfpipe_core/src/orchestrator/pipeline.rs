//! Pipeline runner that executes stages in sequence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::models::PipelineConfig;
use crate::paths::archive_definition_path;

use super::errors::{PipelineError, PipelineResult, StepResult};
use super::step::PipelineStep;
use super::types::{
    Context, EngineInstall, RunReport, RunState, StageResult, StageStatus, StepOutcome,
};

/// Pipeline that runs a sequence of stages.
///
/// Stages run in order. Disabled stages are skipped; the first failure
/// stops the run and later stages are not attempted.
pub struct Pipeline {
    /// Stages to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
    /// Cancellation flag.
    cancelled: Arc<AtomicBool>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add a step to the pipeline.
    pub fn add_step<S: PipelineStep + 'static>(&mut self, step: S) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.add_step(step);
        self
    }

    /// Get a cancellation handle.
    ///
    /// Call `cancel()` on the returned handle to stop the pipeline
    /// at the next stage boundary.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancelled),
        }
    }

    /// Check if pipeline has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Run the pipeline with the given context and state.
    ///
    /// 1. Write the log header and resolve the engine install
    /// 2. For each stage: check cancellation, skip if disabled, run
    ///    `validate_input` then `execute`, move the artifact on success
    /// 3. Write the log footer, whatever the outcome
    pub fn run(&self, ctx: &Context, state: &mut RunState) -> PipelineResult<RunReport> {
        let result = self.run_inner(ctx, state);

        if let Err(ref e) = result {
            tracing::error!("Pipeline failed: {}", e);
        }
        ctx.logger.phase("Process Finished");
        ctx.logger.flush();

        result
    }

    fn run_inner(&self, ctx: &Context, state: &mut RunState) -> PipelineResult<RunReport> {
        ctx.logger.phase("PDF Processing Log Started");
        ctx.logger.info(&format!(
            "Timestamp: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));

        let install = match preflight(ctx) {
            Ok(install) => install,
            Err(e) => {
                ctx.logger.error(&e.to_string());
                return Err(e);
            }
        };
        state.engine = Some(install);

        for step in &self.steps {
            let kind = step.kind();

            if self.is_cancelled() {
                ctx.logger
                    .warn(&format!("Pipeline cancelled before '{}'", step.name()));
                return Err(PipelineError::cancelled(kind));
            }

            if !step.is_enabled(&ctx.config) {
                ctx.logger.debug(&format!("{} disabled, skipping", step.name()));
                state.set_status(kind, StageStatus::Skipped);
                continue;
            }

            ctx.logger.phase(step.name());

            match run_step(step.as_ref(), ctx, state) {
                Ok(outcome) => {
                    ctx.logger.success(&outcome.message);
                    let record = state.record_mut(kind);
                    record.status = StageStatus::Succeeded;
                    record.result = Some(StageResult::succeeded(&outcome.message));
                    state.artifact = Some(outcome.output);
                    state.messages.push(outcome.message);
                }
                Err(e) => {
                    ctx.logger.error(&format!("{} failed: {}", step.name(), e));
                    let record = state.record_mut(kind);
                    record.status = StageStatus::Failed;
                    record.result = Some(StageResult::failed(
                        format!("{} failed", step.name()),
                        e.detail(),
                    ));
                    return Err(PipelineError::stage_failed(kind, e));
                }
            }
        }

        Ok(RunReport {
            messages: state.messages.clone(),
            artifact: state.artifact.clone(),
        })
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn run_step(step: &dyn PipelineStep, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
    let kind = step.kind();

    state.set_status(kind, StageStatus::Validating);
    ctx.logger
        .debug(&format!("Validating input for '{}'", step.name()));
    step.validate_input(ctx, state)?;

    state.set_status(kind, StageStatus::Running);
    ctx.logger.debug(&format!("Executing '{}'", step.name()));
    step.execute(ctx, state)
}

/// Resolve the engine and the PDF/A definition file before any stage runs.
pub(crate) fn preflight(ctx: &Context) -> PipelineResult<EngineInstall> {
    let install = resolve_install(&ctx.config)?;

    ctx.logger.info(&format!(
        "Ghostscript: {}",
        install.engine_path.display()
    ));
    ctx.logger.info(&format!(
        "PDFA_def.ps: {}",
        install.archive_definition.display()
    ));

    Ok(install)
}

/// Locate the engine install named by `config`.
///
/// Fails if no engine path is configured or the PDF/A definition file is
/// missing from the install.
pub fn resolve_install(config: &PipelineConfig) -> PipelineResult<EngineInstall> {
    let engine = config
        .engine_path
        .as_deref()
        .ok_or_else(|| PipelineError::preflight("Ghostscript path is not configured"))?;

    let archive_definition = archive_definition_path(engine);
    if !archive_definition.is_file() {
        return Err(PipelineError::preflight(format!(
            "PDF/A definition file not found: {}",
            archive_definition.display()
        )));
    }

    Ok(EngineInstall {
        engine_path: engine.to_path_buf(),
        archive_definition,
    })
}

/// Handle for cancelling a running pipeline.
#[derive(Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Cancel the pipeline.
    ///
    /// The pipeline will stop at the next stage boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
