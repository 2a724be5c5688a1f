//! JSON Lines parser for error events.
//!
//! This module provides pure parsing functions for converting one JSON line
//! into a validated [`ErrorEvent`]. Field names follow the output document
//! (`type`, `stack_trace`, `grouping_key`, ...) with exceptions nesting their
//! causes under `cause`. Unknown fields are ignored and `null` is treated as
//! absent.

use crate::model::error::ParseError;
use crate::model::{
    ErrorEvent, ErrorLog, ExceptionNode, MalformedLine, OriginalFrame, StackFrame,
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Deepest exception cause chain accepted, counting the root as 1.
///
/// Flattening recurses once per level; the limit sits well below what
/// serde_json's own recursion limit lets through.
pub const MAX_CAUSE_DEPTH: usize = 32;

/// Raw JSON structure for deserializing error events.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawErrorEvent {
    id: Option<String>,
    grouping_key: Option<String>,
    culprit: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: Option<String>,
    stack_trace: Option<String>,
    custom: Option<Map<String, Value>>,
    exception: Option<RawException>,
    log: Option<RawLog>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawException {
    message: Option<String>,
    module: Option<String>,
    #[serde(rename = "type")]
    exception_type: Option<String>,
    code: Option<String>,
    handled: Option<bool>,
    attributes: Option<Value>,
    stacktrace: Option<Vec<RawFrame>>,
    cause: Option<Vec<RawException>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLog {
    message: Option<String>,
    level: Option<String>,
    param_message: Option<String>,
    logger_name: Option<String>,
    stacktrace: Option<Vec<RawFrame>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrame {
    filename: Option<String>,
    classname: Option<String>,
    abs_path: Option<String>,
    module: Option<String>,
    function: Option<String>,
    vars: Option<Map<String, Value>>,
    library_frame: Option<bool>,
    exclude_from_grouping: Option<bool>,
    pre_context: Option<Vec<String>>,
    post_context: Option<Vec<String>>,
    lineno: Option<i64>,
    colno: Option<i64>,
    context_line: Option<String>,
    sourcemap: Option<RawSourcemap>,
    original: Option<RawOriginalFrame>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSourcemap {
    updated: Option<bool>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOriginalFrame {
    abs_path: Option<String>,
    filename: Option<String>,
    classname: Option<String>,
    function: Option<String>,
    lineno: Option<i64>,
    colno: Option<i64>,
    library_frame: Option<bool>,
}

/// Result of parsing a JSON line with graceful error handling.
///
/// This allows the pipeline to continue with subsequent lines even when one
/// line is malformed.
#[derive(Debug, Clone)]
pub enum ParseResult {
    /// Successfully parsed an error event.
    Valid(Box<ErrorEvent>),
    /// The line could not be decoded.
    Malformed(MalformedLine),
}

/// Parse a single JSON line gracefully.
///
/// Unlike [`parse_event`], this function never returns an error. A failed
/// line becomes a [`MalformedLine`] carrying the error and, when the JSON is
/// partially readable, the event id.
///
/// # Arguments
///
/// * `raw` - The raw JSON line to parse
/// * `line_number` - The line number (1-indexed) for error reporting
pub fn parse_event_graceful(raw: &str, line_number: usize) -> ParseResult {
    match parse_event(raw, line_number) {
        Ok(event) => ParseResult::Valid(Box::new(event)),
        Err(parse_error) => {
            let event_id = extract_event_id_best_effort(raw);
            ParseResult::Malformed(MalformedLine::new(line_number, raw, parse_error, event_id))
        }
    }
}

/// Attempt to extract the event id from a line that failed to parse.
fn extract_event_id_best_effort(raw: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct PartialEvent {
        id: Option<String>,
    }

    serde_json::from_str::<PartialEvent>(raw)
        .ok()
        .and_then(|partial| partial.id)
        .filter(|id| !id.is_empty())
}

/// Parse a single JSON line into an ErrorEvent.
///
/// # Errors
///
/// Returns `ParseError` if:
/// - the line is not valid JSON or a field has the wrong JSON type
/// - the exception cause chain is deeper than [`MAX_CAUSE_DEPTH`]
pub fn parse_event(raw: &str, line_number: usize) -> Result<ErrorEvent, ParseError> {
    let raw_event: RawErrorEvent =
        serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
            line: line_number,
            message: e.to_string(),
        })?;

    let exception = raw_event.exception.map(convert_exception);
    if let Some(root) = &exception {
        if root.depth() > MAX_CAUSE_DEPTH {
            return Err(ParseError::CauseTooDeep {
                line: line_number,
                limit: MAX_CAUSE_DEPTH,
            });
        }
    }

    Ok(ErrorEvent {
        id: raw_event.id,
        grouping_key: raw_event.grouping_key,
        culprit: raw_event.culprit,
        error_type: raw_event.error_type,
        message: raw_event.message,
        raw_stack_trace: raw_event.stack_trace,
        custom: raw_event.custom,
        exception,
        log: raw_event.log.map(convert_log),
    })
}

fn convert_exception(raw: RawException) -> ExceptionNode {
    ExceptionNode {
        message: raw.message,
        module: raw.module,
        exception_type: raw.exception_type,
        code: raw.code,
        handled: raw.handled,
        attributes: raw.attributes,
        stacktrace: convert_frames(raw.stacktrace),
        cause: raw
            .cause
            .unwrap_or_default()
            .into_iter()
            .map(convert_exception)
            .collect(),
    }
}

fn convert_log(raw: RawLog) -> ErrorLog {
    ErrorLog {
        message: raw.message,
        level: raw.level,
        param_message: raw.param_message,
        logger_name: raw.logger_name,
        stacktrace: convert_frames(raw.stacktrace),
    }
}

fn convert_frames(raw: Option<Vec<RawFrame>>) -> Vec<StackFrame> {
    raw.unwrap_or_default()
        .into_iter()
        .map(convert_frame)
        .collect()
}

fn convert_frame(raw: RawFrame) -> StackFrame {
    let sourcemap = raw.sourcemap.unwrap_or_default();
    StackFrame {
        filename: raw.filename,
        classname: raw.classname,
        abs_path: raw.abs_path,
        module: raw.module,
        function: raw.function,
        vars: raw.vars,
        library_frame: raw.library_frame.unwrap_or(false),
        exclude_from_grouping: raw.exclude_from_grouping.unwrap_or(false),
        pre_context: raw.pre_context.unwrap_or_default(),
        post_context: raw.post_context.unwrap_or_default(),
        lineno: raw.lineno,
        colno: raw.colno,
        context_line: raw.context_line,
        sourcemap_updated: sourcemap.updated.unwrap_or(false),
        sourcemap_error: sourcemap.error,
        original: raw.original.map(|original| OriginalFrame {
            abs_path: original.abs_path,
            filename: original.filename,
            classname: original.classname,
            function: original.function,
            lineno: original.lineno,
            colno: original.colno,
            library_frame: original.library_frame.unwrap_or(false),
        }),
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
