//! Test utilities for the generation pipeline.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::cell::Cell;

use copygen_ir::{Package, TypeDecl, TypeExpr, TypeKind};

use crate::{
    builder::CodeBuilder,
    generation::{HeaderParts, ImportAliasTable},
    language::{
        Eligibility, EligibilityFilter, FormatError, LanguageBackend, SourceFormatter,
        SynthesisError, SynthesisRequest, Synthesizer,
    },
};

/// Import path requested for every root object.
pub const RUNTIME_PATH: &str = "k8s.io/apimachinery/pkg/runtime";

/// Backend that writes one comment line per type.
///
/// Types with both copy methods written by hand produce nothing; names
/// registered with [`FakeBackend::failing_on`] fail synthesis after touching
/// the import table.
#[derive(Debug, Default)]
pub struct FakeBackend {
    failing: Vec<String>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, type_name: &str) -> Self {
        self.failing.push(type_name.to_string());
        self
    }
}

impl EligibilityFilter for FakeBackend {
    fn eligibility(&self, _package: &Package, ty: &TypeDecl) -> Eligibility {
        if !ty.name.starts_with(|c: char| c.is_uppercase()) {
            return Eligibility::Skipped("unexported".to_string());
        }
        match &ty.kind {
            TypeKind::Interface => Eligibility::Skipped("interface".to_string()),
            TypeKind::Named(TypeExpr::Pointer(_)) => {
                Eligibility::Invalid("named pointer types are not supported".to_string())
            }
            _ => Eligibility::Eligible,
        }
    }
}

impl Synthesizer for FakeBackend {
    fn synthesize(
        &self,
        request: &SynthesisRequest<'_>,
        imports: &mut ImportAliasTable,
        out: &mut CodeBuilder,
    ) -> Result<(), SynthesisError> {
        let ty = request.ty;
        if self.failing.contains(&ty.name) {
            imports.need("example.com/broken");
            out.push_line("// partial");
            return Err(SynthesisError::UnsupportedField {
                field: "Broken".to_string(),
                ty: "interface{}".to_string(),
                reason: "interfaces cannot be copied".to_string(),
            });
        }

        let root = request.decision.implements_root_interface;
        if ty.has_method("DeepCopyInto")
            && ty.has_method("DeepCopy")
            && (!root || ty.has_method("DeepCopyObject"))
        {
            return Ok(());
        }

        if let TypeKind::Struct(fields) = &ty.kind {
            for field in fields {
                for qualifier in field.ty.qualifiers() {
                    let path = request.package.import_path(qualifier).ok_or_else(|| {
                        SynthesisError::UnknownQualifier {
                            qualifier: qualifier.to_string(),
                        }
                    })?;
                    imports.need(path);
                }
            }
        }

        out.push_line(&format!("// copy {}", ty.name));
        if root {
            let runtime = imports.need(RUNTIME_PATH);
            out.push_line(&format!("// object {} {}.Object", ty.name, runtime));
        }
        Ok(())
    }
}

impl LanguageBackend for FakeBackend {
    fn language(&self) -> &'static str {
        "fake"
    }

    fn default_output_file(&self) -> &'static str {
        "zz_generated.fake"
    }

    fn render_header(&self, header: &HeaderParts<'_>) -> String {
        let mut out = String::new();
        if !header.license.is_empty() {
            out.push_str(header.license);
            out.push('\n');
        }
        out.push_str(&format!("package {}\n", header.package_name));
        for spec in header.import_specs {
            out.push_str(&format!("import {}\n", spec));
        }
        out.push('\n');
        out
    }
}

/// Formatter that returns its input unchanged and counts calls.
#[derive(Debug, Default)]
pub struct PassthroughFormatter {
    pub calls: Cell<usize>,
}

impl SourceFormatter for PassthroughFormatter {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        self.calls.set(self.calls.get() + 1);
        Ok(source.to_vec())
    }
}

/// Formatter that always fails.
#[derive(Debug, Default)]
pub struct FailingFormatter;

impl SourceFormatter for FailingFormatter {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn format(&self, _source: &[u8]) -> Result<Vec<u8>, FormatError> {
        Err(FormatError::Syntax {
            line: 1,
            message: "unexpected token".to_string(),
        })
    }
}
