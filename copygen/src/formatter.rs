//! Formatter dispatch.

use copygen_codegen::language::SourceFormatter;
use copygen_codegen_go::{BuiltinFormatter, GoFmt, NoopFormatter};
use copygen_manifest::FormatterKind;

/// Create the formatter selected in copygen.toml or on the command line.
pub fn formatter(kind: FormatterKind) -> Box<dyn SourceFormatter> {
    match kind {
        FormatterKind::Gofmt => Box::new(GoFmt::new()),
        FormatterKind::Builtin => Box::new(BuiltinFormatter),
        FormatterKind::None => Box::new(NoopFormatter),
    }
}
