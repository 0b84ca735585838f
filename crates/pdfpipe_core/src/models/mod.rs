//! Data models for pdfpipe.
//!
//! This module contains the normalized pipeline configuration that every
//! other layer works against:
//! - Enums for stage kinds and compression levels
//! - Per-stage configuration (merge, compress, PDF/A)
//! - Merge input items with optional page ranges

mod enums;
mod pipeline;

pub use enums::{CompressionLevel, StageKind};
pub use pipeline::{
    ArchiveStage, CompressStage, MergeInputItem, MergeStage, PageRange, PipelineConfig,
    DEFAULT_ARCHIVE_PROFILE,
};
