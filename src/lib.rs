//! errdoc
//!
//! Converts application error reports, including trees of causally linked
//! exceptions, into flat sparse JSON documents for a schemaless search index.
//!
//! The library follows a Pure Core / Impure Shell layout: [`model`] and
//! [`document`] are pure, [`parser`] decodes input lines, and [`source`],
//! [`config`], [`logging`] and [`integration`] form the shell used by the
//! `errdoc` binary.

pub mod config;
pub mod document;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;

// Conversion pipeline used by the binary
pub mod integration;
