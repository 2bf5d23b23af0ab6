//! Generate command report data structures.

use std::path::PathBuf;

use copygen_codegen::pipeline::{PackageOutcome, RunReport};

use super::{
    diagnostics::render_diagnostic,
    output::{Output, Report},
};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Name of the formatter that was used.
    pub formatter: &'static str,
    /// Per-package outcomes and diagnostics.
    pub run: RunReport,
    /// Files written or previewed.
    pub result: GenerationResult,
}

/// Where the generated files went.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written below this directory.
    Written { root: PathBuf },
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path, relative to the manifest directory.
    pub path: PathBuf,
    pub content: String,
}

impl GenerateReport {
    pub fn has_errors(&self) -> bool {
        self.run.has_errors()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for diag in self.run.diagnostics() {
            render_diagnostic(out, diag);
        }
        if self.run.diagnostics().next().is_some() {
            out.newline();
        }

        match &self.result {
            GenerationResult::Written { root } => self.render_written(out, root),
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, root: &std::path::Path) {
        out.section(&format!("Packages ({})", self.run.packages.len()));
        for package in &self.run.packages {
            match &package.outcome {
                PackageOutcome::Written { path, formatted } => {
                    let path = root.join(path);
                    if *formatted {
                        out.added_item(&path.display().to_string());
                    } else {
                        out.added_item(&format!("{} (unformatted)", path.display()));
                    }
                }
                PackageOutcome::Nothing => {
                    out.list_item(&format!("{}: nothing to generate", package.name))
                }
                PackageOutcome::Failed => out.list_item(&format!("{}: failed", package.name)),
            }
        }
        out.newline();

        let written = self.run.written().count();
        out.key_value(
            "Generated",
            &format!(
                "{} file{} ({})",
                written,
                if written == 1 { "" } else { "s" },
                self.formatter
            ),
        );
        self.render_counts(out);
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.divider(&file.path.display().to_string());
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", files.len()));
        self.render_counts(out);
    }

    fn render_counts(&self, out: &mut dyn Output) {
        let errors = self.run.error_count();
        let warnings = self.run.warning_count();
        if errors > 0 || warnings > 0 {
            out.key_value(
                "Diagnostics",
                &format!("{} error(s), {} warning(s)", errors, warnings),
            );
        }
    }
}
