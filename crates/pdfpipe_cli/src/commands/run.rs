//! Run command - executes every enabled stage of a pipeline document.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Args;

use pdfpipe_core::config::Settings;
use pdfpipe_core::logging::{JobLoggerBuilder, LineCallback, LogLevel};
use pdfpipe_core::orchestrator::{create_standard_pipeline, Context, RunState};

use crate::picker::StdinFilePicker;
use crate::EXIT_RUN_FAILED;

use super::load_pipeline;

#[derive(Args)]
pub struct RunCommand {
    /// Pipeline document (.yaml, .yml, .toml or .json)
    #[arg(value_name = "DOCUMENT")]
    document: PathBuf,

    /// Never prompt for merge inputs
    #[arg(long)]
    non_interactive: bool,

    /// Folder for the run log (overrides the settings file)
    #[arg(long, value_name = "DIR")]
    logs_dir: Option<PathBuf>,
}

impl RunCommand {
    pub fn execute(self, settings: &Settings, verbose: bool) -> Result<ExitCode> {
        let config = load_pipeline(&self.document, settings)?;

        let logs_dir = self
            .logs_dir
            .unwrap_or_else(|| PathBuf::from(&settings.paths.logs_folder));

        let echo: LineCallback = Box::new(|line| eprintln!("{}", line));
        let mut builder = JobLoggerBuilder::new(&logs_dir)
            .config(settings.logging.to_log_config())
            .line_callback(echo);
        if verbose {
            builder = builder.level(LogLevel::Debug).compact(false);
        }
        let logger = builder
            .build()
            .with_context(|| format!("Failed to create run log in {}", logs_dir.display()))?;
        let logger = Arc::new(logger);

        let mut ctx = Context::new(config, Arc::clone(&logger));
        if !self.non_interactive {
            ctx = ctx.with_file_picker(StdinFilePicker);
        }

        let pipeline = create_standard_pipeline();
        let mut state = RunState::new();
        let result = pipeline.run(&ctx, &mut state);
        let log_path = logger.log_path().display().to_string();

        match result {
            Ok(report) => {
                if report.messages.is_empty() {
                    println!("Nothing to do: no stage is enabled");
                }
                for message in &report.messages {
                    println!("{}", message);
                }
                println!("Log: {}", log_path);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                tracing::debug!("Run failed: {:?}", e);
                eprintln!("Error: {}", e);
                eprintln!("Log: {}", log_path);
                Ok(ExitCode::from(EXIT_RUN_FAILED))
            }
        }
    }
}
