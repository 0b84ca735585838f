//! Subcommand implementations.

pub mod plan;
pub mod run;
pub mod settings;

use std::path::Path;

use anyhow::{Context as _, Result};
use pdfpipe_core::config::Settings;
use pdfpipe_core::document::load_document;
use pdfpipe_core::models::PipelineConfig;

/// Load a pipeline document and apply the settings' engine fallback.
fn load_pipeline(document: &Path, settings: &Settings) -> Result<PipelineConfig> {
    let loaded = load_document(document)
        .with_context(|| format!("Failed to load pipeline document {}", document.display()))?;
    tracing::debug!("Loaded {} ({:?} keys)", document.display(), loaded.scheme);

    Ok(loaded
        .config
        .with_engine_fallback(settings.engine.ghostscript_path()))
}
