//! Compress step - re-encodes the current artifact with a PDFSETTINGS preset.

use crate::command::build_compress_command;
use crate::models::{PipelineConfig, StageKind};
use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunState, StepOutcome};

use super::{chained_paths, require_output, run_engine};

/// Compress step.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompressStep;

impl CompressStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for CompressStep {
    fn kind(&self) -> StageKind {
        StageKind::Compress
    }

    fn is_enabled(&self, config: &PipelineConfig) -> bool {
        config.compress.enabled
    }

    fn validate_input(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        chained_paths(self.kind(), ctx.config.compress.output.as_deref(), state)?;
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
        let output = require_output(self.kind(), ctx.config.compress.output.as_deref())?;
        let input = state.require_artifact(self.kind())?.to_path_buf();
        let engine = state.install()?.engine_path.clone();
        let level = ctx.config.compression_level;

        ctx.logger.info(&format!("Compression level: {}", level));

        let command = build_compress_command(&engine, output, level, &input);
        run_engine(ctx, state, self.kind(), &command)?;

        Ok(StepOutcome::new(self.kind(), output))
    }
}
