//! Error document assembly.
//!
//! Combines the scalar error fields, the optional log sub-document and the
//! flattened exception records into one sparse document. Assembly is a pure
//! function of the event; absence of any part is silently reduced away.

use crate::document::{flatten_exception, transform_frames, DefaultFrameTransformer};
use crate::document::{FrameTransformer, SparseDocument};
use crate::model::{ErrorEvent, ErrorLog, PROCESSOR_EVENT, PROCESSOR_NAME};
use serde_json::{Map, Value};

/// Characters that would make a custom key read as a path or pattern.
const RESERVED_KEY_CHARS: [char; 3] = ['.', '*', '"'];

/// Builds error documents, delegating frames to `T`.
#[derive(Debug, Clone)]
pub struct ErrorDocumentAssembler<T = DefaultFrameTransformer> {
    frames: T,
}

impl ErrorDocumentAssembler<DefaultFrameTransformer> {
    /// Assembler using the default frame layout.
    pub fn new() -> Self {
        Self {
            frames: DefaultFrameTransformer,
        }
    }
}

impl Default for ErrorDocumentAssembler<DefaultFrameTransformer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FrameTransformer> ErrorDocumentAssembler<T> {
    pub fn with_frame_transformer(frames: T) -> Self {
        Self { frames }
    }

    pub fn frame_transformer(&self) -> &T {
        &self.frames
    }

    /// Assemble the sparse document for one error event.
    ///
    /// A fully empty event yields an empty document.
    pub fn to_document(&self, event: &ErrorEvent) -> SparseDocument {
        let mut doc = SparseDocument::new();
        doc.set_if_non_empty_str("id", event.id.as_deref());
        if let Some(root) = &event.exception {
            let records: Vec<Value> = flatten_exception(root, &self.frames)
                .into_iter()
                .map(SparseDocument::into_value)
                .collect();
            doc.set("exception", records);
        }
        doc.set_if_non_empty_str("message", event.message.as_deref());
        doc.set_if_non_empty_str("type", event.error_type.as_deref());
        if let Some(log) = &event.log {
            doc.set_if_non_empty_doc("log", self.log_document(log));
        }
        doc.set_if_non_empty_str("culprit", event.culprit.as_deref());
        let custom = event.custom.as_ref().map(sanitize_custom_keys);
        doc.set_if_non_empty_map("custom", custom.as_ref());
        doc.set_if_non_empty_str("grouping_key", event.grouping_key.as_deref());
        doc.set_if_non_empty_str("stack_trace", event.raw_stack_trace.as_deref());
        doc
    }

    /// Sparse sub-document for an error log. Empty when no sub-field is set.
    pub fn log_document(&self, log: &ErrorLog) -> SparseDocument {
        let mut doc = SparseDocument::new();
        doc.set_if_non_empty_str("message", log.message.as_deref());
        doc.set_if_non_empty_str("param_message", log.param_message.as_deref());
        doc.set_if_non_empty_str("logger_name", log.logger_name.as_deref());
        doc.set_if_non_empty_str("level", log.level.as_deref());
        doc.set_if_non_empty_seq("stacktrace", transform_frames(&self.frames, &log.stacktrace));
        doc
    }

    /// Wrap the error document with the processor tag of error events:
    /// `{"processor": {"name": "error", "event": "error"}, "error": {...}}`.
    ///
    /// The `error` key is omitted when the error document is empty.
    pub fn to_event_document(&self, event: &ErrorEvent) -> SparseDocument {
        let mut processor = SparseDocument::new();
        processor.set("name", PROCESSOR_NAME);
        processor.set("event", PROCESSOR_EVENT);

        let mut doc = SparseDocument::new();
        doc.set("processor", processor);
        doc.set_if_non_empty_doc("error", self.to_document(event));
        doc
    }
}

/// Assemble an error document with the default frame layout.
pub fn to_document(event: &ErrorEvent) -> SparseDocument {
    ErrorDocumentAssembler::new().to_document(event)
}

/// Copy of `custom` with `.`, `*` and `"` in keys replaced by `_`.
///
/// Values are left untouched. If two keys sanitise to the same name the later
/// one in iteration order wins.
pub fn sanitize_custom_keys(custom: &Map<String, Value>) -> Map<String, Value> {
    custom
        .iter()
        .map(|(key, value)| (key.replace(RESERVED_KEY_CHARS, "_"), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExceptionNode, StackFrame};
    use serde_json::json;

    fn doc(event: &ErrorEvent) -> Value {
        to_document(event).into_value()
    }

    #[test]
    fn empty_event_produces_empty_document() {
        assert_eq!(doc(&ErrorEvent::default()), json!({}));
    }

    #[test]
    fn message_only_event() {
        let event = ErrorEvent {
            message: Some("boom".to_string()),
            ..ErrorEvent::default()
        };
        assert_eq!(doc(&event), json!({"message": "boom"}));
    }

    #[test]
    fn scalar_fields_use_output_names() {
        let event = ErrorEvent {
            id: Some("abc123".to_string()),
            grouping_key: Some("gk".to_string()),
            culprit: Some("handler.rs".to_string()),
            error_type: Some("crash".to_string()),
            message: Some("".to_string()),
            raw_stack_trace: Some("at main()\nat start()".to_string()),
            ..ErrorEvent::default()
        };

        assert_eq!(
            doc(&event),
            json!({
                "id": "abc123",
                "type": "crash",
                "culprit": "handler.rs",
                "grouping_key": "gk",
                "stack_trace": "at main()\nat start()"
            })
        );
    }

    #[test]
    fn custom_is_omitted_when_empty() {
        let event = ErrorEvent {
            custom: Some(Map::new()),
            ..ErrorEvent::default()
        };
        assert_eq!(doc(&event), json!({}));
    }

    #[test]
    fn custom_keys_are_sanitized_values_untouched() {
        let mut custom = Map::new();
        custom.insert("user.id".to_string(), json!("a.b"));
        custom.insert("glob*\"q\"".to_string(), json!(1));
        let event = ErrorEvent {
            custom: Some(custom),
            ..ErrorEvent::default()
        };

        assert_eq!(
            doc(&event),
            json!({"custom": {"user_id": "a.b", "glob__q_": 1}})
        );
    }

    #[test]
    fn exception_array_is_inserted() {
        let event = ErrorEvent {
            exception: Some(
                ExceptionNode::with_message("outer")
                    .with_causes(vec![ExceptionNode::with_message("inner")]),
            ),
            ..ErrorEvent::default()
        };

        assert_eq!(
            doc(&event),
            json!({"exception": [{"message": "outer"}, {"message": "inner"}]})
        );
    }

    #[test]
    fn exception_node_without_fields_still_yields_a_record() {
        let event = ErrorEvent {
            exception: Some(ExceptionNode::default()),
            ..ErrorEvent::default()
        };
        assert_eq!(doc(&event), json!({"exception": [{}]}));
    }

    #[test]
    fn empty_log_is_omitted() {
        let event = ErrorEvent {
            log: Some(ErrorLog {
                message: Some("".to_string()),
                ..ErrorLog::default()
            }),
            ..ErrorEvent::default()
        };
        assert_eq!(doc(&event), json!({}));
    }

    #[test]
    fn log_fields_and_stacktrace() {
        let event = ErrorEvent {
            log: Some(ErrorLog {
                message: Some("failed to connect to %s".to_string()),
                level: Some("error".to_string()),
                param_message: Some("failed to connect to %s".to_string()),
                logger_name: Some("db.pool".to_string()),
                stacktrace: vec![StackFrame::at("pool.rs", "connect", 88)],
            }),
            ..ErrorEvent::default()
        };

        assert_eq!(
            doc(&event),
            json!({
                "log": {
                    "message": "failed to connect to %s",
                    "param_message": "failed to connect to %s",
                    "logger_name": "db.pool",
                    "level": "error",
                    "stacktrace": [{
                        "filename": "pool.rs",
                        "function": "connect",
                        "exclude_from_grouping": false,
                        "line": {"number": 88}
                    }]
                }
            })
        );
    }

    #[test]
    fn log_with_only_stacktrace_is_kept() {
        let event = ErrorEvent {
            log: Some(ErrorLog {
                stacktrace: vec![StackFrame::default()],
                ..ErrorLog::default()
            }),
            ..ErrorEvent::default()
        };

        assert_eq!(
            doc(&event),
            json!({"log": {"stacktrace": [{"exclude_from_grouping": false}]}})
        );
    }

    #[test]
    fn top_level_field_order_is_stable() {
        let event = ErrorEvent {
            id: Some("1".to_string()),
            grouping_key: Some("g".to_string()),
            culprit: Some("c".to_string()),
            error_type: Some("t".to_string()),
            message: Some("m".to_string()),
            raw_stack_trace: Some("s".to_string()),
            custom: Some(json!({"k": 1}).as_object().cloned().unwrap_or_default()),
            exception: Some(ExceptionNode::with_message("e")),
            log: Some(ErrorLog {
                level: Some("warn".to_string()),
                ..ErrorLog::default()
            }),
        };

        let document = to_document(&event);
        let keys: Vec<&str> = document.keys().collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "exception",
                "message",
                "type",
                "log",
                "culprit",
                "custom",
                "grouping_key",
                "stack_trace"
            ]
        );
    }

    #[test]
    fn event_document_carries_processor() {
        let event = ErrorEvent {
            message: Some("boom".to_string()),
            ..ErrorEvent::default()
        };

        let envelope = ErrorDocumentAssembler::new()
            .to_event_document(&event)
            .into_value();

        assert_eq!(
            envelope,
            json!({
                "processor": {"name": "error", "event": "error"},
                "error": {"message": "boom"}
            })
        );
    }

    #[test]
    fn event_document_for_empty_event_has_no_error_key() {
        let envelope = ErrorDocumentAssembler::new()
            .to_event_document(&ErrorEvent::default())
            .into_value();

        assert_eq!(
            envelope,
            json!({"processor": {"name": "error", "event": "error"}})
        );
    }

    #[test]
    fn custom_frame_transformer_is_used_for_exceptions_and_log() {
        struct FunctionOnly;

        impl FrameTransformer for FunctionOnly {
            fn transform(&self, frame: &StackFrame) -> SparseDocument {
                let mut doc = SparseDocument::new();
                doc.set_if_non_empty_str("fn", frame.function.as_deref());
                doc
            }
        }

        let frame = StackFrame::at("x.rs", "f", 1);
        let event = ErrorEvent {
            exception: Some(ExceptionNode {
                stacktrace: vec![frame.clone()],
                ..ExceptionNode::default()
            }),
            log: Some(ErrorLog {
                stacktrace: vec![frame],
                ..ErrorLog::default()
            }),
            ..ErrorEvent::default()
        };

        let document = ErrorDocumentAssembler::with_frame_transformer(FunctionOnly)
            .to_document(&event)
            .into_value();

        assert_eq!(
            document,
            json!({
                "exception": [{"stacktrace": [{"fn": "f"}]}],
                "log": {"stacktrace": [{"fn": "f"}]}
            })
        );
    }
}
