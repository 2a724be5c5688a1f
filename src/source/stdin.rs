//! Stdin-based line source for piped input.

use crate::model::error::InputError;
use crate::source::{LineReader, SourceLine};
use std::io::{BufReader, IsTerminal, Read};

/// Stdin source for piped JSON Lines input (`cat events.jsonl | errdoc`).
///
/// Refuses to start on an interactive terminal, so a forgotten pipe does not
/// leave the process silently waiting for keyboard input.
#[derive(Debug)]
pub struct StdinSource<R: Read = std::io::Stdin> {
    lines: LineReader<BufReader<R>>,
}

impl StdinSource<std::io::Stdin> {
    /// Create a new StdinSource from stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY (interactive terminal).
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }
}

impl<R: Read> StdinSource<R> {
    /// Create a StdinSource from any reader, bypassing the TTY check.
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: LineReader::new(BufReader::new(reader)),
        }
    }

    /// Read the next line, `Ok(None)` at EOF.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn next_line(&mut self) -> Result<Option<SourceLine>, InputError> {
        self.lines.next_line()
    }

    /// Check if EOF has been reached (no more data will arrive).
    pub fn is_complete(&self) -> bool {
        self.lines.is_complete()
    }
}
