//! Conversion pipeline.
//!
//! Glues the line sources, the parser and the document assembler together:
//! every non-blank input line becomes one output document. Input and output
//! are passed in, so the whole pipeline is testable on in-memory buffers.

use crate::config::ResolvedConfig;
use crate::document::{ErrorDocumentAssembler, FrameTransformer, SparseDocument};
use crate::model::error::{AppError, InputError, ParseError};
use crate::model::{ErrorEvent, MalformedLine};
use crate::parser::{self, ParseResult};
use crate::source::SourceLine;
use std::io::Write;
use tracing::{debug, warn};

/// Counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Lines read from the source, blank ones included.
    pub lines_read: usize,
    /// Documents written to the output.
    pub documents_written: usize,
    /// Lines skipped because they could not be decoded.
    pub malformed_lines: usize,
    /// Exception records emitted across all documents.
    pub exceptions_flattened: usize,
}

/// Build the output document for one event, wrapped in the processor
/// envelope when `config.envelope` is set.
pub fn render_document<T: FrameTransformer>(
    event: &ErrorEvent,
    assembler: &ErrorDocumentAssembler<T>,
    config: &ResolvedConfig,
) -> SparseDocument {
    if config.envelope {
        assembler.to_event_document(event)
    } else {
        assembler.to_document(event)
    }
}

/// Write one document followed by a newline.
///
/// # Errors
///
/// Returns the writer's I/O error.
pub fn write_document<W: Write + ?Sized>(
    writer: &mut W,
    document: &SparseDocument,
    pretty: bool,
) -> std::io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, document)?;
    } else {
        serde_json::to_writer(&mut *writer, document)?;
    }
    writer.write_all(b"\n")
}

/// Convert every line of `lines` and write the documents to `writer`.
///
/// Blank lines are skipped silently. Malformed lines are logged and counted,
/// or abort the run when `config.fail_on_malformed` is set.
///
/// # Errors
///
/// - `AppError::InputRead` when the source fails
/// - `AppError::Parse` for the first malformed line with `fail_on_malformed`
/// - `AppError::Output` when writing fails
pub fn convert_lines<I, W, T>(
    lines: I,
    assembler: &ErrorDocumentAssembler<T>,
    config: &ResolvedConfig,
    writer: &mut W,
) -> Result<ConvertStats, AppError>
where
    I: IntoIterator<Item = Result<SourceLine, InputError>>,
    W: Write + ?Sized,
    T: FrameTransformer,
{
    let mut stats = ConvertStats::default();

    for line in lines {
        let line = line?;
        stats.lines_read += 1;
        if line.is_blank() {
            continue;
        }

        let parsed = if line.invalid_utf8 {
            ParseResult::Malformed(MalformedLine::new(
                line.number,
                line.text.as_str(),
                ParseError::InvalidUtf8 { line: line.number },
                None,
            ))
        } else {
            parser::parse_event_graceful(&line.text, line.number)
        };

        match parsed {
            ParseResult::Valid(event) => {
                let exceptions = event.exception_count();
                let document = render_document(&event, assembler, config);
                write_document(writer, &document, config.pretty)?;

                debug!(
                    line = line.number,
                    id = event.id.as_deref().unwrap_or_default(),
                    exceptions,
                    fields = document.len(),
                    "Converted error event"
                );
                stats.documents_written += 1;
                stats.exceptions_flattened += exceptions;
            }
            ParseResult::Malformed(malformed) => {
                warn!(
                    line = malformed.line_number(),
                    id = malformed.event_id().unwrap_or_default(),
                    error = %malformed.error(),
                    "Skipping malformed error event"
                );
                if config.fail_on_malformed {
                    return Err(AppError::Parse(malformed.into_error()));
                }
                stats.malformed_lines += 1;
            }
        }
    }

    writer.flush()?;
    Ok(stats)
}
