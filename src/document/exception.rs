//! Exception tree flattening.
//!
//! An exception tree is written as a single array in pre-order (a node, then
//! each of its causes' subtrees in order). A record's parent is the record
//! immediately before it unless the record carries an explicit `parent` index.
//! Only causes after the first need that field, so a linear cause chain is
//! encoded without any back-references.
//!
//! The traversal order is load-bearing: the default-parent rule only holds for
//! depth-first pre-order emission.

use crate::document::{transform_frames, FrameTransformer, SparseDocument};
use crate::model::ExceptionNode;

/// Name of the back-reference field on a flattened exception record.
pub const PARENT_FIELD: &str = "parent";

/// Flatten `root` and its causes into pre-order exception records.
///
/// The root is always the first record and never carries a `parent` field.
pub fn flatten_exception<T: FrameTransformer + ?Sized>(
    root: &ExceptionNode,
    frames: &T,
) -> Vec<SparseDocument> {
    let mut out = Vec::with_capacity(root.node_count());
    append_exception(root, None, frames, &mut out);
    out
}

fn append_exception<T: FrameTransformer + ?Sized>(
    node: &ExceptionNode,
    parent: Option<usize>,
    frames: &T,
    out: &mut Vec<SparseDocument>,
) {
    let offset = out.len();

    let mut fields = SparseDocument::new();
    fields.set_if_non_empty_str("message", node.message.as_deref());
    fields.set_if_non_empty_str("module", node.module.as_deref());
    fields.set_if_non_empty_str("type", node.exception_type.as_deref());
    fields.set_if_non_empty_str("code", node.code.as_deref());
    fields.set_if_present_bool("handled", node.handled);
    if let Some(parent) = parent.filter(|&p| offset > p + 1) {
        fields.set(PARENT_FIELD, parent);
    }
    if let Some(attributes) = node.attributes.as_ref().filter(|v| !v.is_null()) {
        fields.set("attributes", attributes.clone());
    }
    fields.set_if_non_empty_seq("stacktrace", transform_frames(frames, &node.stacktrace));
    out.push(fields);

    for cause in &node.cause {
        append_exception(cause, Some(offset), frames, out);
    }
}
