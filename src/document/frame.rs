//! Stack frame to document transformation.
//!
//! The exception flattener and the log assembler only need "one frame in, one
//! sparse document out"; [`FrameTransformer`] is that seam. The default layout
//! groups line information, source context, source map state and the
//! pre-mapping location into nested objects, each omitted when empty.

use crate::document::SparseDocument;
use crate::model::{OriginalFrame, StackFrame};
use serde_json::Value;

/// Converts one stack frame into its sparse document form.
pub trait FrameTransformer {
    fn transform(&self, frame: &StackFrame) -> SparseDocument;
}

impl<T: FrameTransformer + ?Sized> FrameTransformer for &T {
    fn transform(&self, frame: &StackFrame) -> SparseDocument {
        (**self).transform(frame)
    }
}

/// Apply `transformer` to every frame, keeping frame order.
pub fn transform_frames<T: FrameTransformer + ?Sized>(
    transformer: &T,
    frames: &[StackFrame],
) -> Vec<Value> {
    frames
        .iter()
        .map(|frame| transformer.transform(frame).into_value())
        .collect()
}

/// Frame layout used by the `errdoc` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFrameTransformer;

impl FrameTransformer for DefaultFrameTransformer {
    fn transform(&self, frame: &StackFrame) -> SparseDocument {
        let mut doc = SparseDocument::new();
        doc.set_if_non_empty_str("filename", frame.filename.as_deref());
        doc.set_if_non_empty_str("classname", frame.classname.as_deref());
        doc.set_if_non_empty_str("abs_path", frame.abs_path.as_deref());
        doc.set_if_non_empty_str("module", frame.module.as_deref());
        doc.set_if_non_empty_str("function", frame.function.as_deref());
        doc.set_if_non_empty_map("vars", frame.vars.as_ref());
        doc.set_if_true("library_frame", frame.library_frame);
        // Grouping needs to see the flag either way.
        doc.set("exclude_from_grouping", frame.exclude_from_grouping);

        let mut context = SparseDocument::new();
        context.set_if_non_empty_seq("pre", strings(&frame.pre_context));
        context.set_if_non_empty_seq("post", strings(&frame.post_context));
        doc.set_if_non_empty_doc("context", context);

        let mut line = SparseDocument::new();
        line.set_if_some_int("number", frame.lineno);
        line.set_if_some_int("column", frame.colno);
        line.set_if_non_empty_str("context", frame.context_line.as_deref());
        doc.set_if_non_empty_doc("line", line);

        let mut sourcemap = SparseDocument::new();
        sourcemap.set_if_true("updated", frame.sourcemap_updated);
        sourcemap.set_if_non_empty_str("error", frame.sourcemap_error.as_deref());
        doc.set_if_non_empty_doc("sourcemap", sourcemap);

        if let Some(original) = &frame.original {
            doc.set_if_non_empty_doc("original", original_fields(original));
        }
        doc
    }
}

fn original_fields(original: &OriginalFrame) -> SparseDocument {
    let mut doc = SparseDocument::new();
    doc.set_if_non_empty_str("abs_path", original.abs_path.as_deref());
    doc.set_if_non_empty_str("filename", original.filename.as_deref());
    doc.set_if_non_empty_str("classname", original.classname.as_deref());
    doc.set_if_non_empty_str("function", original.function.as_deref());
    doc.set_if_some_int("lineno", original.lineno);
    doc.set_if_some_int("colno", original.colno);
    doc.set_if_true("library_frame", original.library_frame);
    doc
}

fn strings(lines: &[String]) -> Vec<Value> {
    lines.iter().cloned().map(Value::String).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn transform(frame: &StackFrame) -> Value {
        DefaultFrameTransformer.transform(frame).into_value()
    }

    #[test]
    fn empty_frame_only_carries_exclude_from_grouping() {
        assert_eq!(
            transform(&StackFrame::default()),
            json!({"exclude_from_grouping": false})
        );
    }

    #[test]
    fn line_information_is_nested() {
        let frame = StackFrame {
            context_line: Some("let x = y?;".to_string()),
            colno: Some(9),
            ..StackFrame::at("src/lib.rs", "run", 42)
        };

        assert_eq!(
            transform(&frame),
            json!({
                "filename": "src/lib.rs",
                "function": "run",
                "exclude_from_grouping": false,
                "line": {"number": 42, "column": 9, "context": "let x = y?;"}
            })
        );
    }

    #[test]
    fn source_context_is_omitted_when_empty_and_kept_per_side() {
        let frame = StackFrame {
            pre_context: vec!["fn a() {".to_string()],
            ..StackFrame::default()
        };

        let doc = transform(&frame);
        assert_eq!(doc["context"], json!({"pre": ["fn a() {"]}));
    }

    #[test]
    fn flags_and_vars() {
        let mut vars = Map::new();
        vars.insert("count".to_string(), json!(3));
        let frame = StackFrame {
            library_frame: true,
            exclude_from_grouping: true,
            vars: Some(vars),
            ..StackFrame::default()
        };

        assert_eq!(
            transform(&frame),
            json!({
                "vars": {"count": 3},
                "library_frame": true,
                "exclude_from_grouping": true
            })
        );
    }

    #[test]
    fn sourcemap_and_original_location() {
        let frame = StackFrame {
            sourcemap_updated: true,
            original: Some(OriginalFrame {
                abs_path: Some("http://cdn/app.min.js".to_string()),
                lineno: Some(1),
                colno: Some(1337),
                ..OriginalFrame::default()
            }),
            ..StackFrame::default()
        };

        let doc = transform(&frame);
        assert_eq!(doc["sourcemap"], json!({"updated": true}));
        assert_eq!(
            doc["original"],
            json!({"abs_path": "http://cdn/app.min.js", "lineno": 1, "colno": 1337})
        );
    }

    #[test]
    fn empty_original_is_omitted() {
        let frame = StackFrame {
            original: Some(OriginalFrame::default()),
            ..StackFrame::default()
        };
        assert!(transform(&frame).get("original").is_none());
    }

    #[test]
    fn transform_frames_keeps_order() {
        let frames = vec![
            StackFrame::at("a.rs", "inner", 1),
            StackFrame::at("b.rs", "outer", 2),
        ];

        let docs = transform_frames(&DefaultFrameTransformer, &frames);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["function"], json!("inner"));
        assert_eq!(docs[1]["function"], json!("outer"));
    }
}
