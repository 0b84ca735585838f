//! pdfpipe - run Ghostscript merge → compress → PDF/A pipelines
//!
//! Command-line front end for `pdfpipe_core`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use pdfpipe_core::config::ConfigManager;
use pdfpipe_core::logging::{init_tracing_with_file, LogLevel};

mod commands;
mod picker;

use commands::plan::PlanCommand;
use commands::run::RunCommand;
use commands::settings::SettingsCommand;

/// Exit code for a pipeline that ran and failed.
const EXIT_RUN_FAILED: u8 = 1;
/// Exit code for a document, settings or usage error.
const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(
    name = "pdfpipe",
    version,
    about = "Merge, compress and convert PDFs to PDF/A with Ghostscript",
    after_help = "EXAMPLES:\n  \
                  # Run every enabled stage of a pipeline document\n  \
                  pdfpipe run pipeline.yaml\n\n  \
                  # Show the Ghostscript commands without running them\n  \
                  pdfpipe plan pipeline.yaml\n\n  \
                  # Set the Ghostscript used when a document names none\n  \
                  pdfpipe settings set-engine /usr/local/bin/gs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Application settings file
    #[arg(long, global = true, value_name = "PATH", default_value = ".config/pdfpipe.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the enabled stages of a pipeline document
    Run(RunCommand),

    /// Print the commands a run would execute
    Plan(PlanCommand),

    /// Show or change application settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut manager = ConfigManager::new(&cli.config);
    manager
        .load_or_create()
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        manager.settings().logging.level
    };
    let _guard = init_tracing_with_file(level, &manager.logs_folder());
    tracing::debug!("Settings loaded from {}", manager.path().display());

    match cli.command {
        Commands::Run(cmd) => cmd.execute(manager.settings(), cli.verbose),
        Commands::Plan(cmd) => cmd.execute(manager.settings()),
        Commands::Settings(cmd) => cmd.execute(&mut manager),
    }
}
