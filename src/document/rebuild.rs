//! Rebuilding an exception tree shape from flattened records.
//!
//! This is the consumer-side inverse of [`flatten_exception`]: a record's parent
//! is its explicit `parent` index, or the preceding record when the field is
//! absent. Only the shape is recovered, as record indices.
//!
//! [`flatten_exception`]: crate::document::flatten_exception

use crate::document::PARENT_FIELD;
use crate::model::ExceptionNode;
use serde_json::Value;
use thiserror::Error;

/// Tree shape of a flattened exception array, by record index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionShape {
    pub index: usize,
    pub causes: Vec<ExceptionShape>,
}

impl ExceptionShape {
    /// Shape of a model tree, numbered in pre-order from 0.
    pub fn of(root: &ExceptionNode) -> Self {
        let mut next = 0;
        Self::number(root, &mut next)
    }

    fn number(node: &ExceptionNode, next: &mut usize) -> Self {
        let index = *next;
        *next += 1;
        let causes = node
            .cause
            .iter()
            .map(|cause| Self::number(cause, next))
            .collect();
        Self { index, causes }
    }
}

/// Reasons a record array does not describe a tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RebuildError {
    #[error("exception array is empty")]
    Empty,

    #[error("exception record {index} is not an object")]
    NotAnObject { index: usize },

    #[error("exception record {index} has invalid parent {value}")]
    InvalidParent { index: usize, value: String },

    /// The parent does not precede the record, which pre-order makes impossible.
    #[error("exception record {index} refers to parent {parent}, which does not precede it")]
    ForwardParent { index: usize, parent: usize },
}

/// Rebuild the tree shape described by flattened exception records.
///
/// # Errors
///
/// Returns [`RebuildError`] if the array is empty, a record is not a JSON
/// object, or a `parent` field is not the index of an earlier record.
pub fn rebuild_exception_tree(records: &[Value]) -> Result<ExceptionShape, RebuildError> {
    if records.is_empty() {
        return Err(RebuildError::Empty);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (index, record) in records.iter().enumerate() {
        let fields = record
            .as_object()
            .ok_or(RebuildError::NotAnObject { index })?;

        let parent = match fields.get(PARENT_FIELD) {
            Some(value) => Some(
                value
                    .as_u64()
                    .and_then(|p| usize::try_from(p).ok())
                    .ok_or_else(|| RebuildError::InvalidParent {
                        index,
                        value: value.to_string(),
                    })?,
            ),
            None => index.checked_sub(1),
        };

        if let Some(parent) = parent {
            if parent >= index {
                return Err(RebuildError::ForwardParent { index, parent });
            }
            children[parent].push(index);
        }
    }

    Ok(build(0, &children))
}

fn build(index: usize, children: &[Vec<usize>]) -> ExceptionShape {
    ExceptionShape {
        index,
        causes: children[index]
            .iter()
            .map(|&child| build(child, children))
            .collect(),
    }
}
