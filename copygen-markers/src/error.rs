use miette::Diagnostic;
use thiserror::Error;

use crate::Target;

/// Errors raised while registering or parsing markers.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MarkerError {
    #[error("marker '+{name}' is already registered for {target}s")]
    #[diagnostic(code(copygen::duplicate_marker))]
    DuplicateDefinition { name: String, target: Target },

    #[error("invalid value '{payload}' for {target} marker '+{name}': {reason}")]
    #[diagnostic(code(copygen::invalid_marker))]
    InvalidPayload {
        name: String,
        target: Target,
        payload: String,
        reason: String,
    },

    #[error("{target} marker '+{name}' holds a {found} value, expected {expected}")]
    #[diagnostic(
        code(copygen::marker_type_mismatch),
        help("check that the marker is registered with the shape its consumer expects")
    )]
    TypeMismatch {
        name: String,
        target: Target,
        expected: &'static str,
        found: &'static str,
    },
}
