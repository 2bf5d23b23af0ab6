//! Snapshot tests for Go deepcopy generation.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::path::Path;

use copygen_codegen::{
    enablement::marker_registry,
    language::SourceFormatter,
    pipeline::{GenerationOutcome, Generator, PackageOutcome},
};
use copygen_codegen_go::{BuiltinFormatter, GoBackend, GoFmt};
use copygen_core::MemorySink;
use copygen_ir::{Field, Package, TypeDecl, TypeExpr};

const LICENSE: &str = "/*\nCopyright YEAR The Example Authors.\n*/\n";

fn widget_package() -> Package {
    Package::new("v1", "api/v1")
        .with_marker("+groupName=example.com")
        .with_marker("+kubebuilder:object:generate=true")
        .with_import("metav1", "k8s.io/apimachinery/pkg/apis/meta/v1")
        .with_type(
            TypeDecl::structure(
                "Widget",
                vec![
                    Field::new("TypeMeta", TypeExpr::qualified("metav1", "TypeMeta")),
                    Field::new("ObjectMeta", TypeExpr::qualified("metav1", "ObjectMeta")),
                    Field::new("Spec", TypeExpr::local("WidgetSpec")),
                ],
            )
            .with_marker("+kubebuilder:object:root=true"),
        )
        .with_type(TypeDecl::structure(
            "WidgetSpec",
            vec![
                Field::new("Size", TypeExpr::basic("string")),
                Field::new("Replicas", TypeExpr::pointer(TypeExpr::basic("int32"))),
                Field::new(
                    "Conditions",
                    TypeExpr::slice(TypeExpr::qualified("metav1", "Condition")),
                ),
            ],
        ))
        .with_type(TypeDecl::interface("Reconciler"))
        .with_type(TypeDecl::named("Phase", TypeExpr::basic("string")))
        .with_type(TypeDecl::structure("internalState", vec![]))
}

fn generate(package: &Package) -> String {
    let registry = marker_registry().unwrap();
    let generator =
        Generator::new(&registry, &GoBackend, &BuiltinFormatter).with_header(LICENSE, "2024");

    let generation = generator.generate_for_package(package);
    assert!(
        generation.context.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        generation.context.diagnostics
    );
    match generation.outcome {
        GenerationOutcome::Generated(unit) => {
            assert!(unit.is_formatted());
            String::from_utf8(unit.into_bytes()).unwrap()
        }
        other => panic!("expected generated output, got {other:?}"),
    }
}

#[test]
fn test_widget_package() {
    let output = generate(&widget_package());
    insta::assert_snapshot!(output, @r#"
//go:build !ignore_autogenerated
// +build !ignore_autogenerated

/*
Copyright 2024 The Example Authors.
*/

// Code generated by copygen. DO NOT EDIT.

package v1

import (
	metav1 "k8s.io/apimachinery/pkg/apis/meta/v1"
	"k8s.io/apimachinery/pkg/runtime"
)

// DeepCopyInto is an autogenerated deepcopy function, copying the receiver, writing into out. in must be non-nil.
func (in *Widget) DeepCopyInto(out *Widget) {
	*out = *in
	out.TypeMeta = in.TypeMeta
	in.ObjectMeta.DeepCopyInto(&out.ObjectMeta)
	in.Spec.DeepCopyInto(&out.Spec)
}

// DeepCopy is an autogenerated deepcopy function, copying the receiver, creating a new Widget.
func (in *Widget) DeepCopy() *Widget {
	if in == nil {
		return nil
	}
	out := new(Widget)
	in.DeepCopyInto(out)
	return out
}

// DeepCopyObject is an autogenerated deepcopy function, copying the receiver, creating a new runtime.Object.
func (in *Widget) DeepCopyObject() runtime.Object {
	if c := in.DeepCopy(); c != nil {
		return c
	}
	return nil
}

// DeepCopyInto is an autogenerated deepcopy function, copying the receiver, writing into out. in must be non-nil.
func (in *WidgetSpec) DeepCopyInto(out *WidgetSpec) {
	*out = *in
	if in.Replicas != nil {
		in, out := &in.Replicas, &out.Replicas
		*out = new(int32)
		**out = **in
	}
	if in.Conditions != nil {
		in, out := &in.Conditions, &out.Conditions
		*out = make([]metav1.Condition, len(*in))
		for i := range *in {
			(*in)[i].DeepCopyInto(&(*out)[i])
		}
	}
}

// DeepCopy is an autogenerated deepcopy function, copying the receiver, creating a new WidgetSpec.
func (in *WidgetSpec) DeepCopy() *WidgetSpec {
	if in == nil {
		return nil
	}
	out := new(WidgetSpec)
	in.DeepCopyInto(out)
	return out
}
"#);
}

#[test]
fn test_output_is_stable_across_type_order() {
    let package = widget_package();
    let mut reversed = package.clone();
    reversed.types.reverse();

    assert_eq!(generate(&package), generate(&reversed));
}

#[test]
fn test_output_is_gofmt_clean() {
    let output = generate(&widget_package());
    // gofmt is not installed everywhere the tests run
    if let Ok(formatted) = GoFmt::new().format(output.as_bytes()) {
        assert_eq!(String::from_utf8(formatted).unwrap(), output);
    }
}

#[test]
fn test_legacy_markers() {
    let package = Package::new("v1", "api/v1")
        .with_marker("+k8s:deepcopy-gen=package,register")
        .with_type(TypeDecl::named(
            "Tags",
            TypeExpr::slice(TypeExpr::basic("string")),
        ))
        .with_type(
            TypeDecl::structure("Skipped", vec![]).with_marker("+k8s:deepcopy-gen=false"),
        );

    let output = generate(&package);
    assert!(output.contains("func (in Tags) DeepCopyInto(out *Tags) {"));
    assert!(output.contains("\t\t*out = make(Tags, len(*in))\n\t\tcopy(*out, *in)\n"));
    assert!(!output.contains("Skipped"));
    assert!(!output.contains("import ("));
}

#[test]
fn test_run_writes_one_file_per_package() {
    let registry = marker_registry().unwrap();
    let generator = Generator::new(&registry, &GoBackend, &BuiltinFormatter);
    let packages = vec![
        widget_package(),
        Package::new("v2", "api/v2").with_type(TypeDecl::structure("Widget", vec![])),
    ];

    let sink = MemorySink::new();
    let report = generator.run(&packages, &sink);

    let path = Path::new("api/v1").join("zz_generated.deepcopy.go");
    assert_eq!(
        report.packages[0].outcome,
        PackageOutcome::Written {
            path: path.clone(),
            formatted: true,
        }
    );
    assert_eq!(report.packages[1].outcome, PackageOutcome::Nothing);
    assert!(!report.has_errors());

    let written = String::from_utf8(sink.get(&path).unwrap()).unwrap();
    assert!(written.starts_with("//go:build !ignore_autogenerated\n"));
    assert!(written.contains("\n// Code generated by copygen. DO NOT EDIT.\n\npackage v1\n"));
}
