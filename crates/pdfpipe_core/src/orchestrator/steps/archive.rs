//! PDF/A step - converts the current artifact to PDF/A-2.

use crate::command::build_archive_command;
use crate::models::{PipelineConfig, StageKind};
use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunState, StepOutcome};

use super::{chained_paths, require_output, run_engine};

/// PDF/A conversion step.
///
/// The configured profile is only reported; Ghostscript always runs with
/// `-dPDFA=2`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveStep;

impl ArchiveStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for ArchiveStep {
    fn kind(&self) -> StageKind {
        StageKind::Archive
    }

    fn is_enabled(&self, config: &PipelineConfig) -> bool {
        config.archive.enabled
    }

    fn validate_input(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        chained_paths(self.kind(), ctx.config.archive.output.as_deref(), state)?;
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
        let output = require_output(self.kind(), ctx.config.archive.output.as_deref())?;
        let input = state.require_artifact(self.kind())?.to_path_buf();
        let install = state.install()?.clone();

        ctx.logger
            .info(&format!("PDF/A profile: {}", ctx.config.archive.profile));

        let command = build_archive_command(
            &install.engine_path,
            &install.archive_definition,
            output,
            &input,
        );
        run_engine(ctx, state, self.kind(), &command)?;

        Ok(StepOutcome::new(self.kind(), output))
    }
}
