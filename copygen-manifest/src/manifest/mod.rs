//! Manifest types and parsing for copygen.toml files.

mod file;
mod generator;
mod lower;
mod parse;
mod raw;
mod validate;

use copygen_ir::Package;
pub use file::CopygenToml;
pub use generator::{FormatterKind, GeneratorConfig};
pub use validate::ParseContext;

/// A parsed and validated copygen.toml.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Generator configuration.
    pub generator: GeneratorConfig,

    /// Packages to generate for, in manifest order.
    pub packages: Vec<Package>,
}

impl Manifest {
    /// Find a package by its directory.
    pub fn package(&self, dir: &str) -> Option<&Package> {
        self.packages
            .iter()
            .find(|p| p.dir.as_os_str() == dir)
    }

    /// Total number of type declarations across all packages.
    pub fn type_count(&self) -> usize {
        self.packages.iter().map(|p| p.types.len()).sum()
    }
}
