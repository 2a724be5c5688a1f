//! Domain model types (pure).
//!
//! All types in this module are pure data. They are built once per ingested
//! event and never mutated afterwards.

pub mod error;
pub mod error_event;
pub mod frame;
pub mod malformed_line;

// Re-export for convenience
pub use error_event::{ErrorEvent, ErrorLog, ExceptionNode, PROCESSOR_EVENT, PROCESSOR_NAME};
pub use frame::{OriginalFrame, StackFrame};
pub use malformed_line::MalformedLine;
