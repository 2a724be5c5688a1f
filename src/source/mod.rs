//! Input sources.
//!
//! This module provides line sources for JSON Lines input:
//! - File input for a path given on the command line
//! - Stdin for piped input
//! - Unified InputSource enum for both
//!
//! Sources hand out raw lines with their 1-based line numbers; decoding is
//! left to [`crate::parser`].

use crate::model::error::InputError;
use std::io::BufRead;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// One raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number.
    pub number: usize,
    /// Line content without the trailing newline. Lines that are not valid
    /// UTF-8 are decoded lossily and flagged with `invalid_utf8`.
    pub text: String,
    /// The raw bytes were not valid UTF-8.
    pub invalid_utf8: bool,
}

impl SourceLine {
    /// A line that decoded cleanly.
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            invalid_utf8: false,
        }
    }

    /// True for lines that contain only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Numbered line reader shared by file and stdin sources.
#[derive(Debug)]
pub struct LineReader<R: BufRead> {
    reader: R,
    line_number: usize,
    complete: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            complete: false,
        }
    }

    /// Read the next line.
    ///
    /// Returns `Ok(None)` once EOF is reached. A final line without a
    /// trailing newline is still returned.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors. Invalid UTF-8 is not an
    /// error here; the line comes back flagged with `invalid_utf8`.
    pub fn next_line(&mut self) -> Result<Option<SourceLine>, InputError> {
        if self.complete {
            return Ok(None);
        }

        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            self.complete = true;
            return Ok(None);
        }

        if bytes.ends_with(b"\n") {
            bytes.pop();
            if bytes.ends_with(b"\r") {
                bytes.pop();
            }
        }
        self.line_number += 1;
        let line = match String::from_utf8(bytes) {
            Ok(text) => SourceLine::new(self.line_number, text),
            Err(e) => SourceLine {
                number: self.line_number,
                text: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                invalid_utf8: true,
            },
        };
        Ok(Some(line))
    }

    /// Check if EOF has been reached.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<SourceLine, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Unified input source.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// Lines read from a file.
    File(FileSource),
    /// Lines read from piped stdin.
    Stdin(StdinSource),
}

impl InputSource {
    /// Read the next line from whichever source is active.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn next_line(&mut self) -> Result<Option<SourceLine>, InputError> {
        match self {
            InputSource::File(f) => f.next_line(),
            InputSource::Stdin(s) => s.next_line(),
        }
    }

    /// Human-readable name of the source, for logging.
    pub fn describe(&self) -> String {
        match self {
            InputSource::File(f) => f.path().display().to_string(),
            InputSource::Stdin(_) => "<stdin>".to_string(),
        }
    }
}

impl Iterator for InputSource {
    type Item = Result<SourceLine, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Detect and create the appropriate input source.
///
/// # Logic:
/// 1. If a file path is provided: open a FileSource
/// 2. Otherwise: use StdinSource, which requires stdin to be piped
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a terminal.
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for other I/O errors.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}
