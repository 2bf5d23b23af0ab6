//! Go backend for copygen.
//!
//! Emits `DeepCopyInto`, `DeepCopy` and, for root objects, `DeepCopyObject`
//! methods for the types of a Go package, and formats the result.
//!
//! # Example
//!
//! ```
//! use copygen_codegen::{enablement::marker_registry, pipeline::Generator};
//! use copygen_codegen_go::{BuiltinFormatter, GoBackend};
//! use copygen_ir::{Field, Package, TypeDecl, TypeExpr};
//!
//! let registry = marker_registry().unwrap();
//! let generator = Generator::new(&registry, &GoBackend, &BuiltinFormatter);
//!
//! let package = Package::new("v1", "api/v1")
//!     .with_marker("+kubebuilder:object:generate=true")
//!     .with_type(TypeDecl::structure(
//!         "Widget",
//!         vec![Field::new("Tags", TypeExpr::slice(TypeExpr::basic("string")))],
//!     ));
//!
//! let generation = generator.generate_for_package(&package);
//! assert!(!generation.context.has_errors());
//! ```

mod backend;
mod deepcopy;
mod eligibility;
mod format;

pub use backend::{GENERATED_NOTICE, GoBackend, OUTPUT_FILE};
pub use format::{BuiltinFormatter, GoFmt, NoopFormatter};
