//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - Indented source text, one line at a time
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
