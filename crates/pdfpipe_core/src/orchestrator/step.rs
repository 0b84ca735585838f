//! Pipeline step trait definition.
//!
//! All pipeline stages implement this trait, providing a consistent
//! interface for validation and execution.

use crate::models::{PipelineConfig, StageKind};

use super::errors::StepResult;
use super::types::{Context, RunState, StepOutcome};

/// Trait for pipeline stages.
///
/// The pipeline runner calls these methods in order for every enabled
/// stage:
///
/// 1. `validate_input` - Check preconditions and settle the inputs
/// 2. `execute` - Build the engine command and run it
///
/// A disabled stage is never validated or executed.
pub trait PipelineStep: Send + Sync {
    /// Which stage this is.
    fn kind(&self) -> StageKind;

    /// Get the stage name (for logging and error context).
    fn name(&self) -> &str {
        self.kind().display_name()
    }

    /// Whether the configuration enables this stage.
    fn is_enabled(&self, config: &PipelineConfig) -> bool;

    /// Validate inputs before execution.
    ///
    /// May record what it resolved (e.g. picked merge inputs) in `state`.
    fn validate_input(&self, ctx: &Context, state: &mut RunState) -> StepResult<()>;

    /// Execute the stage's main work.
    ///
    /// Returns the produced file and success message; the pipeline moves
    /// the artifact slot to the produced file.
    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome>;
}
