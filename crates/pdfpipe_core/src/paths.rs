//! Path helpers: absolutizing, lexical normalization, engine install layout.

use std::path::{Component, Path, PathBuf};

use crate::command::ARCHIVE_DEFINITION_FILE;

/// Make `path` absolute against the current directory without touching
/// the filesystem. Falls back to the path unchanged if the current
/// directory is unavailable.
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve `.` and `..` components lexically (symlinks are not followed).
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Absolute, normalized form used to compare paths for collisions.
pub fn comparable(path: &Path) -> PathBuf {
    normalize_lexically(&absolutize(path))
}

/// Location of the PDF/A definition file for a Ghostscript install.
///
/// Ghostscript installs lay out as `<root>/bin/gs` and
/// `<root>/lib/PDFA_def.ps`, so the file sits at
/// `<engine dir>/../../lib/PDFA_def.ps`.
pub fn archive_definition_path(engine: &Path) -> PathBuf {
    let engine_dir = engine.parent().unwrap_or_else(|| Path::new(""));
    let candidate = engine_dir
        .join("..")
        .join("..")
        .join("lib")
        .join(ARCHIVE_DEFINITION_FILE);
    comparable(&candidate)
}
