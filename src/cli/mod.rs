//! CLI module for argument parsing and output formatting.
//!
//! Arguments are parsed with clap; formatters render a
//! [`ValidationReport`](crate::engine::result::ValidationReport) as text,
//! JSON, or JUnit XML.

pub mod args;
pub mod output;
