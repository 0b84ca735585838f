//! Dry run: the commands a pipeline run would execute.

use std::path::Path;

use serde::Serialize;

use crate::command::{
    build_archive_command, build_compress_command, build_merge_command, EngineCommand,
};
use crate::models::{PipelineConfig, StageKind};

use super::errors::{PipelineError, PipelineResult, StepError, StepResult};
use super::steps::{chained_paths, check_merge_inputs, require_output};
use super::types::RunState;

/// One command of a planned run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCommand {
    pub kind: StageKind,
    pub argv: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl PlannedCommand {
    fn new(kind: StageKind, command: EngineCommand) -> Self {
        Self {
            kind,
            argv: command.argv(),
            warnings: command.warnings().to_vec(),
        }
    }
}

/// Build the command of every enabled stage without running anything.
///
/// Artifacts are chained the same way a real run chains them, and the same
/// builders are used, so a plan matches the run byte for byte. A merge stage
/// with no configured inputs cannot be planned because its inputs would be
/// picked at run time.
pub fn plan_commands(
    config: &PipelineConfig,
    archive_definition: &Path,
) -> PipelineResult<Vec<PlannedCommand>> {
    let engine = config
        .engine_path
        .as_deref()
        .ok_or_else(|| PipelineError::preflight("Ghostscript path is not configured"))?;

    let mut planned = Vec::new();
    let mut state = RunState::default();

    if config.merge.enabled {
        let kind = StageKind::Merge;
        let command = plan_merge(config, engine)
            .map_err(|e| PipelineError::stage_failed(kind, e))?;
        state.artifact = config.merge.output.clone();
        planned.push(PlannedCommand::new(kind, command));
    }

    if config.compress.enabled {
        let kind = StageKind::Compress;
        let (output, input) = chained_paths(kind, config.compress.output.as_deref(), &state)
            .map_err(|e| PipelineError::stage_failed(kind, e))?;
        let command = build_compress_command(engine, output, config.compression_level, input);
        let output = output.to_path_buf();
        planned.push(PlannedCommand::new(kind, command));
        state.artifact = Some(output);
    }

    if config.archive.enabled {
        let kind = StageKind::Archive;
        let (output, input) = chained_paths(kind, config.archive.output.as_deref(), &state)
            .map_err(|e| PipelineError::stage_failed(kind, e))?;
        let command = build_archive_command(engine, archive_definition, output, input);
        planned.push(PlannedCommand::new(kind, command));
    }

    Ok(planned)
}

fn plan_merge(config: &PipelineConfig, engine: &Path) -> StepResult<EngineCommand> {
    let output = require_output(StageKind::Merge, config.merge.output.as_deref())?;
    let inputs = &config.merge.inputs;

    if inputs.is_empty() {
        return Err(StepError::no_input(
            "merge inputs are chosen interactively at run time",
        ));
    }
    check_merge_inputs(output, inputs)?;

    Ok(build_merge_command(engine, output, inputs))
}
