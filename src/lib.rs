//! Linear CLI: a machine-parseable command-line client for Linear.
//!
//! Every command answers with one [`envelope::ResponseEnvelope`] on stdout.
//! Failures are classified onto a closed set of error codes, issue references
//! such as `ENG-123` are resolved to opaque ids, and the same envelope can be
//! rendered as JSON, a table, or bare primary values.

pub mod api;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod envelope;
pub mod error;
pub mod identifier;
pub mod logging;
pub mod render;
pub mod schema;
