//! Plan command - prints the Ghostscript commands a run would execute.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use pdfpipe_core::command::format_args_pretty;
use pdfpipe_core::config::Settings;
use pdfpipe_core::orchestrator::plan_commands;
use pdfpipe_core::paths::archive_definition_path;

use super::load_pipeline;

#[derive(Args)]
pub struct PlanCommand {
    /// Pipeline document (.yaml, .yml, .toml or .json)
    #[arg(value_name = "DOCUMENT")]
    document: PathBuf,
}

impl PlanCommand {
    pub fn execute(self, settings: &Settings) -> Result<ExitCode> {
        let config = load_pipeline(&self.document, settings)?;

        let definition = config
            .engine_path
            .as_deref()
            .map(archive_definition_path)
            .unwrap_or_default();
        if config.engine_path.is_some() && !definition.is_file() {
            eprintln!(
                "Warning: {} does not exist; a run would stop before any stage",
                definition.display()
            );
        }

        let planned = plan_commands(&config, &definition)?;
        if planned.is_empty() {
            println!("Nothing to do: no stage is enabled");
        }

        for command in &planned {
            println!("# {}", command.kind);
            for warning in &command.warnings {
                println!("# warning: {}", warning);
            }
            println!("{}\n", format_args_pretty(&command.argv));
        }

        Ok(ExitCode::SUCCESS)
    }
}
