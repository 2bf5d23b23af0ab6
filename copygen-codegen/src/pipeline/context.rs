//! Per-package diagnostic sink.

use super::diagnostic::{Diagnostic, Severity};

/// Error sink for a single package.
///
/// Every problem found while generating for a package is recorded here rather
/// than aborting the run, so one bad type never hides the others.
#[derive(Debug, Clone, Default)]
pub struct PackageContext {
    /// Name of the package the diagnostics belong to.
    pub package: String,
    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl PackageContext {
    /// Create an empty context for `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Add a package-level error.
    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        let location = self.package.clone();
        self.diagnostics.push(Diagnostic::error(phase, message).at(location));
    }

    /// Add a package-level warning.
    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        let location = self.package.clone();
        self.diagnostics.push(Diagnostic::warning(phase, message).at(location));
    }

    /// Add an error located at a type of this package.
    pub fn add_type_error(&mut self, phase: &str, type_name: &str, message: impl Into<String>) {
        let location = self.type_location(type_name);
        self.diagnostics.push(Diagnostic::error(phase, message).at(location));
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Consume the context, returning its diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn type_location(&self, type_name: &str) -> String {
        format!("{}.{}", self.package, type_name)
    }
}
