//! Error types for the errdoc application.
//!
//! This module defines the error taxonomy of the impure shell using `thiserror`.
//! The document core ([`crate::document`]) is a total function and has no error
//! type of its own; only reading input, decoding JSON, loading configuration and
//! writing output can fail.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from the conversion pipeline
//!   - [`InputError`] - File/stdin reading failures (file not found, no input, IO)
//!   - [`ParseError`] - JSON Lines decoding failures (bad UTF-8, malformed JSON, absurd nesting)
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`LoggingError`] - Tracing subscriber initialization failures
//!   - `std::io::Error` - Failures writing documents to the output sink
//!
//! # Recovery Strategy
//!
//! Parse errors are **non-fatal** by default: malformed lines are logged with
//! `tracing::warn!`, counted and skipped. With `fail_on_malformed` enabled the
//! first malformed line aborts the run as [`AppError::Parse`]. Every other
//! variant is fatal.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// Domain-specific errors convert into `AppError` via `From`, so the pipeline
/// composes with the `?` operator.
///
/// # Examples
///
/// ```no_run
/// use errdoc::model::error::{AppError, InputError};
///
/// fn run() -> Result<(), AppError> {
///     let _input = open_input()?;
///     Ok(())
/// }
/// # fn open_input() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// A line could not be decoded into an error event and
    /// `fail_on_malformed` is enabled.
    #[error("Failed to parse error event: {0}")]
    Parse(#[from] ParseError),

    /// Writing a document to the output sink failed (broken pipe, full disk).
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),
}

/// Errors encountered when reading input from files or stdin.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use errdoc::model::error::InputError;
///
/// let err = InputError::FileNotFound {
///     path: PathBuf::from("/tmp/missing.jsonl")
/// };
/// assert!(err.to_string().contains("/tmp/missing.jsonl"));
/// ```
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified input file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No file path was given and stdin is an interactive terminal.
    ///
    /// ```
    /// use errdoc::model::error::InputError;
    ///
    /// let msg = InputError::NoInput.to_string();
    /// assert!(msg.contains("file path or pipe data to stdin"));
    /// ```
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when decoding one JSON line into an
/// [`ErrorEvent`](crate::model::ErrorEvent).
///
/// All variants carry the 1-based line number so the warning emitted for a
/// skipped line points at the offending input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line is not valid JSON, or does not match the error event layout
    /// (for example `handled` given as a string).
    ///
    /// ```
    /// use errdoc::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "expected value at line 1 column 1".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// The 1-based line number where decoding failed.
        line: usize,
        /// The `serde_json` error message.
        message: String,
    },

    /// The line is not valid UTF-8, so it cannot be JSON.
    #[error("Invalid UTF-8 at line {line}")]
    InvalidUtf8 {
        /// The 1-based line number of the rejected line.
        line: usize,
    },

    /// The exception cause tree nests deeper than the supported limit.
    ///
    /// Flattening is recursive, so unbounded nesting is rejected at the
    /// boundary instead of risking stack exhaustion later.
    #[error("Exception cause chain at line {line} is deeper than {limit} levels")]
    CauseTooDeep {
        /// The 1-based line number of the rejected event.
        line: usize,
        /// The maximum supported depth.
        limit: usize,
    },
}
