//! Ghostscript argument builders for the three pipeline stages.
//!
//! # Page ranges
//!
//! Ghostscript applies `-dFirstPage`/`-dLastPage` to the input files that
//! follow them on the command line. A ranged merge item therefore emits its
//! flags immediately before its own path, and every item starts from a
//! clean range state so bounds never leak onto the next file.

use std::path::Path;

use crate::models::{CompressionLevel, MergeInputItem};

use super::EngineCommand;

/// File name of the PDF/A definition resource shipped with Ghostscript.
pub const ARCHIVE_DEFINITION_FILE: &str = "PDFA_def.ps";

/// Flags shared by the merge and compress invocations.
fn pdfwrite_batch(engine: &Path) -> EngineCommand {
    let mut cmd = EngineCommand::new(engine);
    cmd.arg("-dBATCH").arg("-dNOPAUSE").arg("-sDEVICE=pdfwrite");
    cmd
}

fn output_flag(output: &Path) -> String {
    format!("-sOutputFile={}", output.display())
}

/// Build the merge invocation.
///
/// Items are emitted in order. Unrecognized items are skipped and recorded
/// as warnings on the returned command.
pub fn build_merge_command(
    engine: &Path,
    output: &Path,
    items: &[MergeInputItem],
) -> EngineCommand {
    let mut cmd = pdfwrite_batch(engine);
    cmd.arg(output_flag(output));

    for item in items {
        match item {
            MergeInputItem::Path(path) => {
                cmd.path_arg(path);
            }
            MergeInputItem::Ranged { path, range } => {
                if let Some(first) = range.first {
                    cmd.arg(format!("-dFirstPage={}", first));
                }
                if let Some(last) = range.last {
                    cmd.arg(format!("-dLastPage={}", last));
                }
                cmd.path_arg(path);
            }
            MergeInputItem::Unrecognized(raw) => {
                tracing::warn!("Skipping unrecognized merge input: {}", raw);
                cmd.warn(format!("Unrecognized entry in merge inputs: {}", raw));
            }
        }
    }

    cmd
}

/// Build the compress invocation for `input` at the given preset.
pub fn build_compress_command(
    engine: &Path,
    output: &Path,
    level: CompressionLevel,
    input: &Path,
) -> EngineCommand {
    let mut cmd = pdfwrite_batch(engine);
    cmd.arg(format!("-dPDFSETTINGS=/{}", level.token()))
        .arg(output_flag(output))
        .path_arg(input);
    cmd
}

/// Build the PDF/A-2 conversion invocation.
///
/// The definition file must come before the input document.
pub fn build_archive_command(
    engine: &Path,
    definition: &Path,
    output: &Path,
    input: &Path,
) -> EngineCommand {
    let mut cmd = EngineCommand::new(engine);
    cmd.arg("-dPDFA=2")
        .arg("-sDEVICE=pdfwrite")
        .arg("-dNOPAUSE")
        .arg("-dBATCH")
        .arg("-dNOOUTERSAVE")
        .arg("-sColorConversionStrategy=RGB")
        .arg("-sProcessColorModel=DeviceRGB")
        .arg(output_flag(output))
        .arg("-dPDFACompatibilityPolicy=1")
        .path_arg(definition)
        .path_arg(input);
    cmd
}
