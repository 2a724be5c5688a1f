//! Malformed input lines.
//!
//! When a JSON line cannot be decoded into an ErrorEvent, a MalformedLine
//! records what went wrong so the pipeline can report it and move on.

use crate::model::error::ParseError;

/// A JSON line that could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedLine {
    line_number: usize,
    raw_line: String,
    error: ParseError,
    event_id: Option<String>,
}

impl MalformedLine {
    /// Create a new malformed line record.
    ///
    /// # Arguments
    ///
    /// * `line_number` - The line number in the input (1-indexed)
    /// * `raw_line` - The raw line content that failed to decode
    /// * `error` - Why decoding failed
    /// * `event_id` - The event `id`, if it could be recovered from a partial decode
    pub fn new(
        line_number: usize,
        raw_line: impl Into<String>,
        error: ParseError,
        event_id: Option<String>,
    ) -> Self {
        Self {
            line_number,
            raw_line: raw_line.into(),
            error,
            event_id,
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    pub fn error(&self) -> &ParseError {
        &self.error
    }

    /// Consume the record, keeping only the error.
    pub fn into_error(self) -> ParseError {
        self.error
    }

    /// The event id, if recoverable.
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }
}
