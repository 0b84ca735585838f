//! Engine process execution.
//!
//! Runs a built [`EngineCommand`](crate::command::EngineCommand) as a child
//! process, writes the full command and its output to the job log, and
//! classifies the result:
//!
//! - exit code 0: success
//! - any other exit code: [`EngineError::NonZeroExit`] carrying stderr
//! - failure to spawn or wait: [`EngineError::Spawn`]
//!
//! Spawning goes through the [`CommandExecutor`] trait so the pipeline can
//! be driven by a scripted engine in tests.

mod process;
mod types;

pub use process::{CommandExecutor, ProcessRunner, SystemExecutor};
pub use types::{EngineError, EngineResult, ProcessOutput};
