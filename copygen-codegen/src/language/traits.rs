//! Language-agnostic generation traits.

use copygen_ir::{Package, TypeDecl};
use serde::Serialize;
use thiserror::Error;

use crate::{
    builder::{CodeBuilder, Indent},
    enablement::EnablementDecision,
    generation::{HeaderParts, ImportAliasTable},
};

/// Whether a type can have copy methods generated at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum Eligibility {
    Eligible,
    /// Silently skipped, e.g. unexported names or interfaces.
    Skipped(String),
    /// Skipped and reported as an error against the package.
    Invalid(String),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }
}

/// Decides which enabled types can be synthesized. Must not have side effects.
pub trait EligibilityFilter {
    fn eligibility(&self, package: &Package, ty: &TypeDecl) -> Eligibility;
}

/// Everything a synthesizer needs to know about one type.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisRequest<'a> {
    pub package: &'a Package,
    pub ty: &'a TypeDecl,
    pub decision: EnablementDecision,
}

/// A type whose copy methods can't be synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("cannot copy field '{field}' of type {ty}: {reason}")]
    UnsupportedField {
        field: String,
        ty: String,
        reason: String,
    },

    #[error("cannot copy underlying type {ty}: {reason}")]
    UnsupportedUnderlying { ty: String, reason: String },

    #[error("import qualifier '{qualifier}' is not declared for this package")]
    UnknownQualifier { qualifier: String },
}

/// Writes the copy methods of one type.
///
/// Writing nothing is valid: the type simply contributes no output. On error
/// the orchestrator discards whatever was written and restores the import
/// table.
pub trait Synthesizer {
    fn synthesize(
        &self,
        request: &SynthesisRequest<'_>,
        imports: &mut ImportAliasTable,
        out: &mut CodeBuilder,
    ) -> Result<(), SynthesisError>;
}

/// Failure to canonically format a generated file.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} rejected the generated source: {message}")]
    Rejected { tool: String, message: String },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// Canonical source formatter.
pub trait SourceFormatter {
    /// Short name used in logs, e.g. `gofmt`.
    fn name(&self) -> &'static str;

    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError>;
}

/// A target language: eligibility, synthesis and the file header.
pub trait LanguageBackend: EligibilityFilter + Synthesizer {
    /// Language identifier (e.g. "go").
    fn language(&self) -> &'static str;

    /// File name used when none is configured.
    fn default_output_file(&self) -> &'static str;

    /// Indentation used by synthesized code.
    fn indent(&self) -> Indent {
        Indent::default()
    }

    /// Everything that precedes the synthesized methods in the output file.
    fn render_header(&self, header: &HeaderParts<'_>) -> String;
}
