//! pdfpipe core - Ghostscript merge → compress → PDF/A pipeline
//!
//! This crate contains all pipeline logic with zero UI dependencies.
//! It can be used by the CLI or any other front end.

pub mod command;
pub mod config;
pub mod document;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod paths;
pub mod picker;
pub mod runner;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
