//! Pipeline orchestrator for coordinating a run.
//!
//! A run is a fixed sequence of stages sharing one working file. Each stage
//! validates its inputs, runs one Ghostscript command and hands its output
//! to the next stage.
//!
//! # Architecture
//!
//! ```text
//! Pipeline
//!     ├── Pre-flight: engine path + PDFA_def.ps
//!     ├── Step: Merge
//!     ├── Step: Compress
//!     └── Step: PDF/A
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pdfpipe_core::document::load_document;
//! use pdfpipe_core::logging::{JobLogger, LogConfig};
//! use pdfpipe_core::orchestrator::{create_standard_pipeline, Context, RunState};
//!
//! let loaded = load_document("pipeline.yaml".as_ref()).unwrap();
//! let logger = Arc::new(JobLogger::new("logs", LogConfig::default(), None).unwrap());
//! let ctx = Context::new(loaded.config, logger);
//!
//! let mut state = RunState::new();
//! let report = create_standard_pipeline().run(&ctx, &mut state).unwrap();
//! for message in &report.messages {
//!     println!("{}", message);
//! }
//! ```

mod errors;
mod pipeline;
mod plan;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{resolve_install, CancelHandle, Pipeline};
pub use plan::{plan_commands, PlannedCommand};
pub use step::PipelineStep;
pub use steps::{ArchiveStep, CompressStep, MergeStep};
pub use types::{
    Context, EngineInstall, RunReport, RunState, StageRecord, StageResult, StageStatus,
    StepOutcome,
};

/// Create a standard pipeline with all stages in the correct order.
///
/// 1. Merge - join the inputs into one file
/// 2. Compress - re-encode with the configured preset
/// 3. PDF/A - convert to PDF/A-2
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(MergeStep::new())
        .with_step(CompressStep::new())
        .with_step(ArchiveStep::new())
}
