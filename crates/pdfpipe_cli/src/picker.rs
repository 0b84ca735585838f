//! Console file picker.

use std::io::{self, BufRead};
use std::path::PathBuf;

use pdfpipe_core::picker::FilePicker;

/// Prompts on stderr and reads one path per line from stdin until a blank
/// line or end of input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinFilePicker;

impl FilePicker for StdinFilePicker {
    fn pick_files(&self, title: &str) -> Vec<PathBuf> {
        eprintln!("{}", title);
        eprintln!("Enter one path per line, blank line to finish:");
        read_paths(io::stdin().lock())
    }
}

fn read_paths(reader: impl BufRead) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        files.push(PathBuf::from(trimmed));
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stops_at_blank_line() {
        let input = Cursor::new("a.pdf\n  b.pdf \n\nc.pdf\n");
        assert_eq!(
            read_paths(input),
            vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]
        );
    }

    #[test]
    fn end_of_input_finishes() {
        assert_eq!(read_paths(Cursor::new("only.pdf")), vec![PathBuf::from("only.pdf")]);
        assert!(read_paths(Cursor::new("")).is_empty());
    }
}
