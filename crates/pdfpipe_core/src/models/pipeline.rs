//! Normalized pipeline configuration.
//!
//! These types are what the document loader produces regardless of which
//! key-naming scheme the source document used.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::enums::CompressionLevel;

/// Profile reported for the PDF/A stage when the document names none.
pub const DEFAULT_ARCHIVE_PROFILE: &str = "PDF/A-2b";

/// Root configuration for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineConfig {
    /// Path to the Ghostscript executable (None = not configured).
    pub engine_path: Option<PathBuf>,
    /// Merge stage.
    pub merge: MergeStage,
    /// Compress stage.
    pub compress: CompressStage,
    /// PDF/A conversion stage.
    pub archive: ArchiveStage,
    /// Preset applied by the compress stage.
    pub compression_level: CompressionLevel,
}

impl PipelineConfig {
    /// Use `engine` when the document did not name a Ghostscript binary.
    pub fn with_engine_fallback(mut self, engine: Option<PathBuf>) -> Self {
        if self.engine_path.is_none() {
            self.engine_path = engine;
        }
        self
    }

    /// True if no stage is enabled.
    pub fn is_empty(&self) -> bool {
        !self.merge.enabled && !self.compress.enabled && !self.archive.enabled
    }
}

/// Merge several PDFs (or page ranges of them) into one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeStage {
    pub enabled: bool,
    /// Inputs in merge order. Empty means "ask the file picker".
    pub inputs: Vec<MergeInputItem>,
    pub output: Option<PathBuf>,
}

/// Re-encode the current artifact with a `PDFSETTINGS` preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompressStage {
    pub enabled: bool,
    pub output: Option<PathBuf>,
}

/// Convert the current artifact to PDF/A.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveStage {
    pub enabled: bool,
    pub output: Option<PathBuf>,
    /// Reported in the log only; Ghostscript always runs in PDF/A-2 mode.
    pub profile: String,
}

impl Default for ArchiveStage {
    fn default() -> Self {
        Self {
            enabled: false,
            output: None,
            profile: DEFAULT_ARCHIVE_PROFILE.to_string(),
        }
    }
}

/// Optional page bounds attached to a single merge input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub first: Option<NonZeroU32>,
    pub last: Option<NonZeroU32>,
}

impl PageRange {
    pub fn new(first: Option<NonZeroU32>, last: Option<NonZeroU32>) -> Self {
        Self { first, last }
    }

    /// True if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.first.is_none() && self.last.is_none()
    }
}

/// One entry of the merge input list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeInputItem {
    /// Whole file.
    Path(PathBuf),
    /// File restricted to a page range.
    Ranged { path: PathBuf, range: PageRange },
    /// Entry the loader could not interpret; skipped with a warning.
    Unrecognized(String),
}

impl MergeInputItem {
    /// Convenience constructor for a ranged item.
    pub fn ranged(
        path: impl Into<PathBuf>,
        first: Option<NonZeroU32>,
        last: Option<NonZeroU32>,
    ) -> Self {
        Self::Ranged {
            path: path.into(),
            range: PageRange::new(first, last),
        }
    }

    /// File path of the item, if it has one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            MergeInputItem::Path(path) | MergeInputItem::Ranged { path, .. } => Some(path),
            MergeInputItem::Unrecognized(_) => None,
        }
    }

    /// Short description for log lines.
    pub fn describe(&self) -> String {
        match self {
            MergeInputItem::Path(path) => path.display().to_string(),
            MergeInputItem::Ranged { path, range } => {
                let first = range.first.map(|p| p.to_string()).unwrap_or_default();
                let last = range.last.map(|p| p.to_string()).unwrap_or_default();
                format!("{} [{}..{}]", path.display(), first, last)
            }
            MergeInputItem::Unrecognized(raw) => format!("<unrecognized: {}>", raw),
        }
    }
}

impl From<PathBuf> for MergeInputItem {
    fn from(path: PathBuf) -> Self {
        MergeInputItem::Path(path)
    }
}
