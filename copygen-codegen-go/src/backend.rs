//! The Go language backend.

use copygen_codegen::{
    builder::{CodeBuilder, Indent},
    generation::{HeaderParts, ImportAliasTable},
    language::{LanguageBackend, SynthesisError, SynthesisRequest, Synthesizer},
};

use crate::deepcopy::CopyWriter;

/// File every package's generated code is written to by default.
pub const OUTPUT_FILE: &str = "zz_generated.deepcopy.go";

/// Marks the file as generated for Go tooling.
pub const GENERATED_NOTICE: &str = "// Code generated by copygen. DO NOT EDIT.";

/// Build constraint that keeps marker scanners away from generated files.
const BUILD_CONSTRAINT: &str = "//go:build !ignore_autogenerated\n// +build !ignore_autogenerated";

/// Generates Go deepcopy methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoBackend;

impl Synthesizer for GoBackend {
    fn synthesize(
        &self,
        request: &SynthesisRequest<'_>,
        imports: &mut ImportAliasTable,
        out: &mut CodeBuilder,
    ) -> Result<(), SynthesisError> {
        CopyWriter::new(request.package, imports, out).write_type(request.ty, request.decision)
    }
}

impl LanguageBackend for GoBackend {
    fn language(&self) -> &'static str {
        "go"
    }

    fn default_output_file(&self) -> &'static str {
        OUTPUT_FILE
    }

    fn indent(&self) -> Indent {
        Indent::GO
    }

    fn render_header(&self, header: &HeaderParts<'_>) -> String {
        let mut builder = CodeBuilder::go();
        builder.push_line(BUILD_CONSTRAINT).push_blank();

        // The license is embedded exactly as read, trailing whitespace included.
        if !header.license.trim().is_empty() {
            builder.push_raw(header.license);
            if !header.license.ends_with('\n') {
                builder.push_blank();
            }
            builder.push_blank();
        }

        builder
            .push_line(GENERATED_NOTICE)
            .push_blank()
            .push_line(&format!("package {}", header.package_name))
            .push_blank();

        if !header.import_specs.is_empty() {
            builder.push_line("import (").push_indent();
            for spec in header.import_specs {
                builder.push_line(spec);
            }
            builder.push_dedent().push_line(")").push_blank();
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_without_license_or_imports() {
        let header = GoBackend.render_header(&HeaderParts {
            license: "",
            package_name: "v1",
            import_specs: &[],
        });

        assert_eq!(
            header,
            "//go:build !ignore_autogenerated\n// +build !ignore_autogenerated\n\n\
             // Code generated by copygen. DO NOT EDIT.\n\npackage v1\n\n"
        );
    }

    #[test]
    fn test_header_with_license_and_imports() {
        let specs = vec![
            "metav1 \"k8s.io/apimachinery/pkg/apis/meta/v1\"".to_string(),
            "\"k8s.io/apimachinery/pkg/runtime\"".to_string(),
        ];
        let header = GoBackend.render_header(&HeaderParts {
            license: "/*\nCopyright 2024 Example.\n*/\n",
            package_name: "v1",
            import_specs: &specs,
        });

        assert_eq!(
            header,
            "//go:build !ignore_autogenerated\n// +build !ignore_autogenerated\n\n\
             /*\nCopyright 2024 Example.\n*/\n\n\
             // Code generated by copygen. DO NOT EDIT.\n\npackage v1\n\n\
             import (\n\tmetav1 \"k8s.io/apimachinery/pkg/apis/meta/v1\"\n\
             \t\"k8s.io/apimachinery/pkg/runtime\"\n)\n\n"
        );
    }

    #[test]
    fn test_license_is_embedded_verbatim() {
        let header = GoBackend.render_header(&HeaderParts {
            license: "// Copyright YEAR X  \n\n\n",
            package_name: "v1",
            import_specs: &[],
        });
        assert_eq!(
            header,
            "//go:build !ignore_autogenerated\n// +build !ignore_autogenerated\n\n\
             // Copyright YEAR X  \n\n\n\n\
             // Code generated by copygen. DO NOT EDIT.\n\npackage v1\n\n"
        );

        let header = GoBackend.render_header(&HeaderParts {
            license: "// Copyright 2024 Example.",
            package_name: "v1",
            import_specs: &[],
        });
        assert!(header.contains("// Copyright 2024 Example.\n\n// Code generated"));

        let header = GoBackend.render_header(&HeaderParts {
            license: " \n\t\n",
            package_name: "v1",
            import_specs: &[],
        });
        assert!(!header.contains(" \n\t"));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(GoBackend.language(), "go");
        assert_eq!(GoBackend.default_output_file(), "zz_generated.deepcopy.go");
        assert_eq!(GoBackend.indent(), Indent::Tab);
    }
}
