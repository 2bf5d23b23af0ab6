//! Per-package and per-run results.

use std::path::PathBuf;

use serde::Serialize;

use super::diagnostic::Diagnostic;

/// What happened to one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PackageOutcome {
    /// Output was written; `formatted` is false after a formatter fallback.
    Written { path: PathBuf, formatted: bool },
    /// No type produced output, so no file was written.
    Nothing,
    /// The package could not be generated or written.
    Failed,
}

/// Result of generating one package.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    pub name: String,
    pub dir: PathBuf,
    pub outcome: PackageOutcome,
    pub diagnostics: Vec<Diagnostic>,
}

impl PackageReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

/// Result of a whole run, in package order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub packages: Vec<PackageReport>,
}

impl RunReport {
    /// True if any package failed or recorded an error.
    pub fn has_errors(&self) -> bool {
        self.packages
            .iter()
            .any(|p| p.outcome == PackageOutcome::Failed || p.has_errors())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics().filter(|d| d.severity.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics().filter(|d| d.severity.is_warning()).count()
    }

    /// Paths of every file written.
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.packages.iter().filter_map(|p| match &p.outcome {
            PackageOutcome::Written { path, .. } => Some(path),
            _ => None,
        })
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.packages.iter().flat_map(|p| p.diagnostics.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: PackageOutcome, diagnostics: Vec<Diagnostic>) -> PackageReport {
        PackageReport {
            name: "v1".to_string(),
            dir: PathBuf::from("api/v1"),
            outcome,
            diagnostics,
        }
    }

    #[test]
    fn test_clean_run() {
        let run = RunReport {
            packages: vec![
                report(
                    PackageOutcome::Written {
                        path: PathBuf::from("api/v1/zz_generated.deepcopy.go"),
                        formatted: true,
                    },
                    vec![],
                ),
                report(PackageOutcome::Nothing, vec![]),
            ],
        };
        assert!(!run.has_errors());
        assert_eq!(run.written().count(), 1);
    }

    #[test]
    fn test_errors_and_warnings_counted() {
        let run = RunReport {
            packages: vec![
                report(
                    PackageOutcome::Written {
                        path: PathBuf::from("zz_generated.deepcopy.go"),
                        formatted: false,
                    },
                    vec![Diagnostic::warning("format", "left unformatted")],
                ),
                report(PackageOutcome::Failed, vec![Diagnostic::error("markers", "bad")]),
            ],
        };
        assert!(run.has_errors());
        assert_eq!(run.error_count(), 1);
        assert_eq!(run.warning_count(), 1);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(PackageOutcome::Nothing).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "nothing" }));
    }
}
