//! File picker collaborator for the merge stage.
//!
//! The merge stage asks the picker for inputs only when the document lists
//! none. Front ends supply their own implementation.

use std::path::PathBuf;

/// Source of merge inputs chosen at run time.
pub trait FilePicker: Send + Sync {
    /// Return the chosen files in merge order. An empty list means the
    /// user chose nothing.
    fn pick_files(&self, title: &str) -> Vec<PathBuf>;
}

/// Picker that never returns anything (non-interactive runs).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFilePicker;

impl FilePicker for NoFilePicker {
    fn pick_files(&self, title: &str) -> Vec<PathBuf> {
        tracing::debug!("No file picker available for '{}'", title);
        Vec::new()
    }
}

/// Picker returning a fixed list, for scripted runs.
#[derive(Debug, Default, Clone)]
pub struct StaticFilePicker {
    files: Vec<PathBuf>,
}

impl StaticFilePicker {
    pub fn new(files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl FilePicker for StaticFilePicker {
    fn pick_files(&self, _title: &str) -> Vec<PathBuf> {
        self.files.clone()
    }
}
