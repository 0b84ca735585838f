//! Process runner: spawn, capture, log, classify.

use std::io;
use std::process::Command;

use crate::command::EngineCommand;
use crate::logging::JobLogger;

use super::types::{EngineError, EngineResult, ProcessOutput};

/// Something that can run an engine command to completion.
pub trait CommandExecutor: Send + Sync {
    /// Run the command, blocking until it exits.
    ///
    /// Returns `Err` only if the process could not be spawned or waited on;
    /// a nonzero exit is a successful execution with a failing output.
    fn execute(&self, command: &EngineCommand) -> io::Result<ProcessOutput>;
}

/// Executor that spawns real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, command: &EngineCommand) -> io::Result<ProcessOutput> {
        tracing::debug!("Running: {}", command.display_line());

        let output = Command::new(command.program())
            .args(command.args())
            .output()?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Runs engine commands and reports every invocation to the job log.
pub struct ProcessRunner {
    executor: Box<dyn CommandExecutor>,
}

impl ProcessRunner {
    /// Create a runner backed by the given executor.
    pub fn new(executor: impl CommandExecutor + 'static) -> Self {
        Self {
            executor: Box::new(executor),
        }
    }

    /// Create a runner that spawns real processes.
    pub fn system() -> Self {
        Self::new(SystemExecutor)
    }

    /// Run a command and classify the outcome.
    ///
    /// The command line, stdout and stderr are written to `logger` before
    /// this returns, whatever the outcome.
    pub fn run(&self, command: &EngineCommand, logger: &JobLogger) -> EngineResult<ProcessOutput> {
        logger.clear_tail();
        logger.output_section("Running Ghostscript Command");
        logger.command(&command.display_line());
        logger.arguments(&command.argv());

        let output = match self.executor.execute(command) {
            Ok(output) => output,
            Err(e) => {
                logger.error(&format!("EXCEPTION: {}", e));
                let program = command.program().display().to_string();
                return Err(EngineError::spawn(program, e));
            }
        };

        logger.output_section("STDOUT");
        for line in output.stdout.lines() {
            logger.output_line(line, false);
        }
        logger.output_section("STDERR");
        for line in output.stderr.lines() {
            logger.output_line(line, true);
        }

        if !output.success() {
            match output.exit_code {
                Some(code) => logger.error(&format!("Exit code {}", code)),
                None => logger.error("Process terminated by signal"),
            }
            logger.show_tail("ghostscript");
            return Err(EngineError::NonZeroExit {
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        logger.success("exit code 0");
        Ok(output)
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::system()
    }
}
