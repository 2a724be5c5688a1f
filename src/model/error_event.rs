//! Error event aggregate: the error report, its exception tree and its log record.
//!
//! These are plain data records. Every field is optional, so the structs carry
//! public fields and derive `Default`; there is nothing to validate at
//! construction time. Absence is modelled with `Option`, never with empty
//! placeholder strings, although empty strings are tolerated and treated as
//! absent when a document is assembled.

use crate::model::StackFrame;
use serde_json::{Map, Value};

/// Processor name attached to every error event envelope.
pub const PROCESSOR_NAME: &str = "error";

/// Processor event kind attached to every error event envelope.
pub const PROCESSOR_EVENT: &str = "error";

// ===== ErrorEvent =====

/// An application error report. Aggregate root of the model.
///
/// `raw_stack_trace` holds a trace that could not be parsed into frames; it is
/// independent of the structured `exception` tree and both may be present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorEvent {
    pub id: Option<String>,
    pub grouping_key: Option<String>,
    pub culprit: Option<String>,
    pub error_type: Option<String>,
    pub message: Option<String>,
    pub raw_stack_trace: Option<String>,
    pub custom: Option<Map<String, Value>>,
    pub exception: Option<ExceptionNode>,
    pub log: Option<ErrorLog>,
}

impl ErrorEvent {
    /// Number of exception records this event flattens into.
    pub fn exception_count(&self) -> usize {
        self.exception.as_ref().map_or(0, ExceptionNode::node_count)
    }
}

// ===== ExceptionNode =====

/// One exception in a causal exception tree.
///
/// `cause` lists the exceptions that caused this one, in source order. The
/// first cause is the primary continuation of the chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExceptionNode {
    pub message: Option<String>,
    pub module: Option<String>,
    pub exception_type: Option<String>,
    pub code: Option<String>,
    /// Tri-state: `None` means unknown, which is distinct from `Some(false)`.
    pub handled: Option<bool>,
    /// Opaque agent-provided value, passed through as-is.
    pub attributes: Option<Value>,
    pub stacktrace: Vec<StackFrame>,
    pub cause: Vec<ExceptionNode>,
}

impl ExceptionNode {
    /// Create an exception node carrying only a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Replace the causes of this node.
    pub fn with_causes(mut self, cause: Vec<ExceptionNode>) -> Self {
        self.cause = cause;
        self
    }

    /// Number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.cause.iter().map(ExceptionNode::node_count).sum::<usize>()
    }

    /// Depth of this subtree. A node without causes has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.cause.iter().map(ExceptionNode::depth).max().unwrap_or(0)
    }
}

// ===== ErrorLog =====

/// A logged error message, independent of any exception tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorLog {
    pub message: Option<String>,
    pub level: Option<String>,
    pub param_message: Option<String>,
    pub logger_name: Option<String>,
    pub stacktrace: Vec<StackFrame>,
}
