//! Pipeline stage implementations.
//!
//! Each stage validates its inputs, builds one Ghostscript command and runs
//! it through the context's process runner.

mod archive;
mod compress;
mod merge;

use std::path::Path;

use crate::command::EngineCommand;
use crate::models::{MergeInputItem, StageKind};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::types::{Context, RunState};
use crate::paths::comparable;

pub use archive::ArchiveStep;
pub use compress::CompressStep;
pub use merge::{MergeStep, PICKER_TITLE};

/// The configured output path, or a configuration error.
pub(crate) fn require_output(kind: StageKind, output: Option<&Path>) -> StepResult<&Path> {
    output.ok_or_else(|| StepError::configuration(format!("{} output path is not set", kind)))
}

/// Reject an output path that names one of the stage's own inputs.
pub(crate) fn ensure_no_collision<'a>(
    kind: StageKind,
    output: &Path,
    inputs: impl IntoIterator<Item = &'a Path>,
) -> StepResult<()> {
    let target = comparable(output);
    for input in inputs {
        if comparable(input) == target {
            return Err(StepError::configuration(format!(
                "{} output {} would overwrite its own input",
                kind,
                output.display()
            )));
        }
    }
    Ok(())
}

/// Merge inputs must name at least one file and must not include the output.
pub(crate) fn check_merge_inputs(
    output: &Path,
    inputs: &[MergeInputItem],
) -> StepResult<()> {
    if !inputs.iter().any(|item| item.path().is_some()) {
        return Err(StepError::no_input("no files to merge"));
    }
    ensure_no_collision(
        StageKind::Merge,
        output,
        inputs.iter().filter_map(MergeInputItem::path),
    )
}

/// Output and input of a stage that consumes the current artifact.
pub(crate) fn chained_paths<'a>(
    kind: StageKind,
    output: Option<&'a Path>,
    state: &'a RunState,
) -> StepResult<(&'a Path, &'a Path)> {
    let output = require_output(kind, output)?;
    let input = state.require_artifact(kind)?;
    ensure_no_collision(kind, output, [input])?;
    Ok((output, input))
}

/// Run a built command, recording it on the stage record first.
fn run_engine(
    ctx: &Context,
    state: &mut RunState,
    kind: StageKind,
    command: &EngineCommand,
) -> StepResult<()> {
    for warning in command.warnings() {
        ctx.logger.warn(warning);
    }
    state.record_mut(kind).command = Some(command.argv());

    ctx.runner().run(command, &ctx.logger)?;
    Ok(())
}
