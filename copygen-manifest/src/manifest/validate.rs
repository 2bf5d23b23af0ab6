//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use copygen_ir::is_keyword;
use miette::SourceSpan;

use crate::{Error, Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the manifest hierarchy, making it easier to pass validation
/// context through nested packages and types.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "copygen.toml");
/// ctx.validate_name("v1", "package")?;
///
/// // For nested validation
/// let nested = ctx.push("v1").push("Widget");
/// nested.validate_name("Spec", "field")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["v1", "Widget"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "field in 'v1.Widget'" or just "package" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a quoted value in the source.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), value)
    }

    /// Validation error pointing at `value` when it can be located.
    pub fn error_at(&self, message: impl Into<String>, value: &str) -> Box<Error> {
        self.source
            .validation_error(message, self.find_span(value))
    }

    /// Validate that a name is a valid Go identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        let reason = if is_keyword(name) {
            Some("it is a Go keyword".to_string())
        } else {
            validate_identifier(name)
        };

        match reason {
            Some(reason) => Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            )),
            None => Ok(()),
        }
    }
}

/// Returns None if `name` is a valid identifier, Some(reason) otherwise.
pub(crate) fn validate_identifier(name: &str) -> Option<String> {
    let mut chars = name.chars();
    match chars.next() {
        None => Some("name is empty".to_string()),
        Some(c) if !(c.is_alphabetic() || c == '_') => {
            Some(format!("starts with '{}'", c))
        }
        Some(_) => chars
            .find(|c| !(c.is_alphanumeric() || *c == '_'))
            .map(|c| format!("contains '{}'", c)),
    }
}

/// Find the span of a quoted string value in the TOML source.
///
/// Looks for `"value"` then `'value'`; the span covers the value without quotes.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    if value.is_empty() {
        return None;
    }
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert_eq!(validate_identifier("Widget"), None);
        assert_eq!(validate_identifier("_private"), None);
        assert_eq!(validate_identifier("v1"), None);
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("1abc").is_some());
        assert!(validate_identifier("foo-bar").is_some());
    }

    #[test]
    fn test_keywords_rejected() {
        let ctx = ParseContext::new("", "copygen.toml");
        assert!(ctx.validate_name("type", "package").is_err());
        assert!(ctx.validate_name("v1", "package").is_ok());
    }

    #[test]
    fn test_find_value_span() {
        let src = "name = \"Widget\"\nother = 'Thing'";
        assert_eq!(find_value_span(src, "Widget"), Some(SourceSpan::from((8, 6))));
        assert_eq!(find_value_span(src, "Thing"), Some(SourceSpan::from((25, 5))));
        assert_eq!(find_value_span(src, "Missing"), None);
    }

    #[test]
    fn test_context_for() {
        let ctx = ParseContext::new("", "copygen.toml");
        assert_eq!(ctx.context_for("package"), "package");
        let nested = ctx.push("v1").push("Widget");
        assert_eq!(nested.context_for("field"), "field in 'v1.Widget'");
    }
}
