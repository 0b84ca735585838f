//! Settings commands - inspect and edit the application settings file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Subcommand;

use pdfpipe_core::config::{ConfigManager, ConfigSection};
use pdfpipe_core::paths::archive_definition_path;

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings
    Show,

    /// Set the Ghostscript used when a document names none
    SetEngine {
        /// Path to the Ghostscript executable
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

impl SettingsCommand {
    pub fn execute(self, manager: &mut ConfigManager) -> Result<ExitCode> {
        match self {
            SettingsCommand::Show => show(manager)?,
            SettingsCommand::SetEngine { path } => set_engine(manager, path)?,
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn show(manager: &ConfigManager) -> Result<()> {
    let settings = manager.settings();
    let engine = settings
        .engine
        .ghostscript_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string());

    println!("Settings file: {}", manager.path().display());
    println!();
    println!("[paths]");
    println!("  logs_folder         = {}", settings.paths.logs_folder);
    println!("[logging]");
    println!("  level               = {:?}", settings.logging.level);
    println!("  compact             = {}", settings.logging.compact);
    println!("  error_tail          = {}", settings.logging.error_tail);
    println!("  show_timestamps     = {}", settings.logging.show_timestamps);
    println!("  show_command_pretty = {}", settings.logging.show_command_pretty);
    println!("[engine]");
    println!("  ghostscript         = {}", engine);
    Ok(())
}

fn set_engine(manager: &mut ConfigManager, path: PathBuf) -> Result<()> {
    let definition = archive_definition_path(&path);
    if !definition.is_file() {
        eprintln!(
            "Warning: {} not found next to this Ghostscript",
            definition.display()
        );
    }

    manager.settings_mut().engine.ghostscript = path.display().to_string();
    manager
        .update_section(ConfigSection::Engine)
        .with_context(|| format!("Failed to write {}", manager.path().display()))?;

    println!("Ghostscript set to {}", path.display());
    Ok(())
}
