//! Sparse error documents (pure core).
//!
//! Converts an [`ErrorEvent`](crate::model::ErrorEvent) into a flat,
//! self-describing JSON document that omits absent fields instead of storing
//! nulls. Nothing in this module performs I/O or can fail.

pub mod assembler;
pub mod exception;
pub mod frame;
pub mod rebuild;
pub mod sparse;

pub use assembler::{sanitize_custom_keys, to_document, ErrorDocumentAssembler};
pub use exception::{flatten_exception, PARENT_FIELD};
pub use frame::{transform_frames, DefaultFrameTransformer, FrameTransformer};
pub use rebuild::{rebuild_exception_tree, ExceptionShape, RebuildError};
pub use sparse::SparseDocument;
