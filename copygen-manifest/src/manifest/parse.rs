//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, lower::lower_manifest, raw::RawManifest, validate::ParseContext};
use crate::{Error, Result};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "copygen.toml")
    }
}

impl Manifest {
    /// Parse a copygen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a copygen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = ParseContext::new(content, filename);
    let raw: RawManifest =
        toml::from_str(content).map_err(|e| ctx.source_context().parse_error(e))?;
    lower_manifest(raw, &ctx)
}

#[cfg(test)]
mod tests {
    use copygen_ir::{TypeExpr, TypeKind};

    use super::*;
    use crate::FormatterKind;

    const EXAMPLE: &str = r#"
        [generator]
        header_file = "hack/boilerplate.go.txt"
        year = "2024"
        formatter = "gofmt"

        [[packages]]
        name = "v1"
        path = "api/v1"
        markers = ["+kubebuilder:object:generate=true"]

        [packages.imports]
        metav1 = "k8s.io/apimachinery/pkg/apis/meta/v1"

        [[packages.types]]
        name = "Widget"
        markers = ["+kubebuilder:object:root=true"]
        fields = [
            { type = "metav1.TypeMeta", embedded = true },
            { name = "Spec", type = "WidgetSpec" },
            { name = "Tags", type = "[]string" },
        ]

        [[packages.types]]
        name = "Labels"
        underlying = "map[string]string"

        [[packages.types]]
        name = "Shape"
        interface = true
        methods = ["Area"]
    "#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = Manifest::from_str(EXAMPLE).unwrap();

        assert_eq!(manifest.generator.formatter, FormatterKind::Gofmt);
        assert_eq!(manifest.generator.year(), "2024");
        assert_eq!(manifest.packages.len(), 1);
        assert_eq!(manifest.type_count(), 3);

        let pkg = manifest.package("api/v1").unwrap();
        assert_eq!(pkg.name, "v1");
        assert_eq!(pkg.markers, vec!["+kubebuilder:object:generate=true"]);

        let widget = pkg.find_type("Widget").unwrap();
        let TypeKind::Struct(fields) = &widget.kind else {
            panic!("Widget should be a struct");
        };
        assert_eq!(fields[0].name, "TypeMeta");
        assert_eq!(fields[0].ty, TypeExpr::qualified("metav1", "TypeMeta"));
        assert_eq!(fields[2].ty, TypeExpr::slice(TypeExpr::basic("string")));

        let labels = pkg.find_type("Labels").unwrap();
        assert_eq!(labels.kind.as_str(), "map");

        let shape = pkg.find_type("Shape").unwrap();
        assert_eq!(shape.kind, TypeKind::Interface);
        assert!(shape.has_method("Area"));
    }

    #[test]
    fn test_missing_generator_uses_defaults() {
        let manifest = Manifest::from_str(
            r#"
            [[packages]]
            name = "v1"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.generator.formatter, FormatterKind::Builtin);
        assert_eq!(manifest.packages[0].dir, Path::new("."));
    }

    #[test]
    fn test_unparsable_toml() {
        let err = Manifest::from_str("[[packages]\nname = 1").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Manifest::from_str(
            r#"
            [[packages]]
            name = "v1"
            colour = "blue"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_invalid_type_expression() {
        let err = Manifest::from_str(
            r#"
            [[packages]]
            name = "v1"

            [[packages.types]]
            name = "Widget"
            fields = [{ name = "Broken", type = "map[string" }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidType { .. }));
    }

    #[test]
    fn test_undeclared_qualifier() {
        let err = Manifest::from_str(
            r#"
            [[packages]]
            name = "v1"

            [[packages.types]]
            name = "Widget"
            fields = [{ name = "Meta", type = "metav1.ObjectMeta" }]
            "#,
        )
        .unwrap_err();
        match *err {
            Error::InvalidType { reason, .. } => assert!(reason.contains("metav1")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_conflicting_shapes() {
        let err = Manifest::from_str(
            r#"
            [[packages]]
            name = "v1"

            [[packages.types]]
            name = "Widget"
            interface = true
            underlying = "string"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_duplicate_package_dir() {
        let err = Manifest::from_str(
            r#"
            [[packages]]
            name = "v1"
            path = "api"

            [[packages]]
            name = "v2"
            path = "api"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_invalid_package_name() {
        let err = Manifest::from_str(
            r#"
            [[packages]]
            name = "my-pkg"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_unnamed_non_embeddable_field() {
        let err = Manifest::from_str(
            r#"
            [[packages]]
            name = "v1"

            [[packages.types]]
            name = "Widget"
            fields = [{ type = "[]string" }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }
}
