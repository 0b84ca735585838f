//! Core enums used throughout the pipeline.

use serde::{Deserialize, Serialize};

/// One of the three pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Merge,
    Compress,
    Archive,
}

impl StageKind {
    /// All stages in the fixed order the pipeline runs them.
    pub const ALL: [StageKind; 3] = [StageKind::Merge, StageKind::Compress, StageKind::Archive];

    /// Name used in log lines, success messages and errors.
    pub fn display_name(&self) -> &'static str {
        match self {
            StageKind::Merge => "Merge",
            StageKind::Compress => "Compress",
            StageKind::Archive => "PDF/A",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Ghostscript `PDFSETTINGS` preset used by the compress stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// 72 dpi, smallest output.
    Screen,
    /// 150 dpi.
    #[default]
    Ebook,
    /// 300 dpi.
    Printer,
    /// 300 dpi, colour preserving.
    Prepress,
    /// Ghostscript's general-purpose preset.
    Default,
}

impl CompressionLevel {
    /// The bare token as Ghostscript expects it after the `/`.
    pub fn token(&self) -> &'static str {
        match self {
            CompressionLevel::Screen => "screen",
            CompressionLevel::Ebook => "ebook",
            CompressionLevel::Printer => "printer",
            CompressionLevel::Prepress => "prepress",
            CompressionLevel::Default => "default",
        }
    }
}

impl std::fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
