use copygen_codegen::pipeline::{Diagnostic, Severity};

use super::output::Output;

/// Render one pipeline diagnostic, with its location on a second line.
pub(super) fn render_diagnostic(out: &mut dyn Output, diag: &Diagnostic) {
    let msg = match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    };
    match diag.severity {
        Severity::Error => out.error(&msg),
        Severity::Warning => out.warning(&msg),
    }
}
