//! Stack frame records.
//!
//! A frame is opaque to the exception flattening algorithm; its document form
//! is produced by a [`FrameTransformer`](crate::document::FrameTransformer).

use serde_json::{Map, Value};

/// One call frame of a stack trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackFrame {
    pub filename: Option<String>,
    pub classname: Option<String>,
    pub abs_path: Option<String>,
    pub module: Option<String>,
    pub function: Option<String>,
    /// Local variables captured by the agent.
    pub vars: Option<Map<String, Value>>,
    pub library_frame: bool,
    pub exclude_from_grouping: bool,
    pub pre_context: Vec<String>,
    pub post_context: Vec<String>,
    pub lineno: Option<i64>,
    pub colno: Option<i64>,
    pub context_line: Option<String>,
    /// Set when the frame was rewritten through a source map.
    pub sourcemap_updated: bool,
    pub sourcemap_error: Option<String>,
    /// Location before source mapping, if the frame was rewritten.
    pub original: Option<OriginalFrame>,
}

/// Frame location as reported before source mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OriginalFrame {
    pub abs_path: Option<String>,
    pub filename: Option<String>,
    pub classname: Option<String>,
    pub function: Option<String>,
    pub lineno: Option<i64>,
    pub colno: Option<i64>,
    pub library_frame: bool,
}

impl StackFrame {
    /// Frame pointing at `function` in `filename` at line `lineno`.
    pub fn at(filename: impl Into<String>, function: impl Into<String>, lineno: i64) -> Self {
        Self {
            filename: Some(filename.into()),
            function: Some(function.into()),
            lineno: Some(lineno),
            ..Self::default()
        }
    }
}
