//! Merge step - joins the input PDFs (or page ranges of them) into one file.

use crate::command::build_merge_command;
use crate::models::{MergeInputItem, PipelineConfig, StageKind};
use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunState, StepOutcome};

use super::{check_merge_inputs, require_output, run_engine};

/// Title passed to the file picker when the document lists no inputs.
pub const PICKER_TITLE: &str = "Select the PDFs to merge";

/// Merge step.
///
/// Uses the configured inputs, or asks the file picker when there are none.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeStep;

impl MergeStep {
    pub fn new() -> Self {
        Self
    }

    fn resolve_inputs(&self, ctx: &Context) -> Vec<MergeInputItem> {
        let configured = &ctx.config.merge.inputs;
        if !configured.is_empty() {
            return configured.clone();
        }

        ctx.logger
            .info("No merge inputs configured, asking for files");
        let picked: Vec<MergeInputItem> = ctx
            .pick_files(PICKER_TITLE)
            .into_iter()
            .map(MergeInputItem::from)
            .collect();
        ctx.logger.info(&format!("{} file(s) selected", picked.len()));
        picked
    }
}

impl PipelineStep for MergeStep {
    fn kind(&self) -> StageKind {
        StageKind::Merge
    }

    fn is_enabled(&self, config: &PipelineConfig) -> bool {
        config.merge.enabled
    }

    fn validate_input(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        let output = require_output(self.kind(), ctx.config.merge.output.as_deref())?;

        let inputs = self.resolve_inputs(ctx);
        check_merge_inputs(output, &inputs)?;
        state.merge_inputs = inputs;
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
        let output = require_output(self.kind(), ctx.config.merge.output.as_deref())?;
        let engine = state.install()?.engine_path.clone();

        ctx.logger.section("Merge input files");
        for item in &state.merge_inputs {
            ctx.logger.info(&format!("  {}", item.describe()));
        }

        let command = build_merge_command(&engine, output, &state.merge_inputs);
        run_engine(ctx, state, self.kind(), &command)?;

        Ok(StepOutcome::new(self.kind(), output))
    }
}
