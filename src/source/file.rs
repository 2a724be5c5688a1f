//! File-based line source.

use crate::model::error::InputError;
use crate::source::{LineReader, SourceLine};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Reads JSON lines from a file, front to back.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    lines: LineReader<BufReader<File>>,
}

impl FileSource {
    /// Open the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, InputError> {
        let path = path.into();

        if !path.exists() {
            return Err(InputError::FileNotFound { path });
        }

        let file = File::open(&path)?;
        Ok(Self {
            path,
            lines: LineReader::new(BufReader::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the next line, `Ok(None)` at EOF.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn next_line(&mut self) -> Result<Option<SourceLine>, InputError> {
        self.lines.next_line()
    }
}
