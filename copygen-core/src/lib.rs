//! Core utilities and types for the copygen deepcopy generator.
//!
//! This crate provides the output sinks generated files are written through
//! and small string helpers shared across the workspace.

mod file;
mod utils;

// File operations
pub use file::{FileSink, MemorySink, OutputSink, WriteError, write_output};
// String utilities
pub use utils::substitute_year;
