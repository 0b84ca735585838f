//! Ghostscript command construction.
//!
//! Builds the exact argument vectors the pipeline stages pass to the
//! engine. Everything here is pure: no I/O, no validation beyond skipping
//! merge items that have no usable path.
//!
//! # Architecture
//!
//! - **EngineCommand**: program path + ordered arguments + build warnings
//! - **ghostscript**: one builder per stage (merge, compress, PDF/A)

mod ghostscript;

use std::path::{Path, PathBuf};

pub use ghostscript::{
    build_archive_command, build_compress_command, build_merge_command, ARCHIVE_DEFINITION_FILE,
};

/// A fully built engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    program: PathBuf,
    args: Vec<String>,
    warnings: Vec<String>,
}

impl EngineCommand {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Append a path argument.
    pub fn path_arg(&mut self, path: &Path) -> &mut Self {
        self.arg(path.to_string_lossy())
    }

    /// Record a non-fatal problem found while building.
    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Executable to run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, without the program.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Warnings collected while building (e.g. skipped merge items).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Full argv: program followed by arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Single-line rendering for logs. Tokens with whitespace are quoted.
    pub fn display_line(&self) -> String {
        self.argv()
            .iter()
            .map(|token| quote_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Single-quote a token that would not read back as one shell word.
fn quote_token(token: &str) -> String {
    let needs_quotes = token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));
    if needs_quotes {
        format!("'{}'", token.replace('\'', "'\\''"))
    } else {
        token.to_string()
    }
}

/// Format an argv one token per line, shell-continuation style.
pub fn format_args_pretty(argv: &[String]) -> String {
    let mut result = String::new();
    for (i, token) in argv.iter().enumerate() {
        result.push_str(&quote_token(token));
        if i + 1 < argv.len() {
            result.push_str(" \\\n  ");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv_starts_with_program() {
        let mut cmd = EngineCommand::new("/usr/bin/gs");
        cmd.arg("-dBATCH").path_arg(Path::new("in.pdf"));

        assert_eq!(cmd.argv(), vec!["/usr/bin/gs", "-dBATCH", "in.pdf"]);
        assert_eq!(cmd.display_line(), "/usr/bin/gs -dBATCH in.pdf");
        assert!(cmd.warnings().is_empty());
    }

    #[test]
    fn paths_with_spaces_are_quoted() {
        let mut cmd = EngineCommand::new("/opt/gs/bin/gs");
        cmd.arg("-sOutputFile=my merged.pdf")
            .path_arg(Path::new("scan one.pdf"))
            .path_arg(Path::new("owner's.pdf"))
            .arg("b.pdf");

        assert_eq!(
            cmd.display_line(),
            "/opt/gs/bin/gs '-sOutputFile=my merged.pdf' 'scan one.pdf' 'owner'\\''s.pdf' b.pdf"
        );
        // argv itself is untouched
        assert_eq!(cmd.args()[1], "scan one.pdf");
        assert_eq!(
            format_args_pretty(&cmd.argv()[..2]),
            "/opt/gs/bin/gs \\\n  '-sOutputFile=my merged.pdf'"
        );
    }

    #[test]
    fn pretty_format_puts_one_token_per_line() {
        let argv = vec!["gs".to_string(), "-q".to_string(), "a.pdf".to_string()];
        assert_eq!(format_args_pretty(&argv), "gs \\\n  -q \\\n  a.pdf");
    }
}
