//! Parsing and validation of `copygen.toml`.
//!
//! The manifest carries the generator configuration and describes the
//! packages to generate for. Parsing lowers every package into the
//! [`copygen_ir`] model so later stages never see raw TOML.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{CopygenToml, FormatterKind, GeneratorConfig, Manifest, ParseContext};

/// Default output filename, reserved for generated code.
pub const DEFAULT_OUTPUT_FILE: &str = "zz_generated.deepcopy.go";
