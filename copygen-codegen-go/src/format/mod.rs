//! Source formatters for generated Go code.

mod builtin;
mod gofmt;

use copygen_codegen::language::{FormatError, SourceFormatter};

pub use builtin::BuiltinFormatter;
pub use gofmt::GoFmt;

/// Leaves the source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl SourceFormatter for NoopFormatter {
    fn name(&self) -> &'static str {
        "none"
    }

    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        Ok(source.to_vec())
    }
}
