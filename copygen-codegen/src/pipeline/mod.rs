//! The generation pipeline: planning, synthesis and reporting.

mod context;
mod diagnostic;
mod generator;
mod report;

pub use context::PackageContext;
pub use diagnostic::{Diagnostic, Severity};
pub use generator::{
    GenerationOutcome, Generator, PackageGeneration, PackagePlan, PlanError, TypePlan,
};
pub use report::{PackageOutcome, PackageReport, RunReport};

/// Phase names attached to diagnostics.
pub mod phase {
    pub const MARKERS: &str = "markers";
    pub const ELIGIBILITY: &str = "eligibility";
    pub const SYNTHESIS: &str = "synthesis";
    pub const FORMAT: &str = "format";
    pub const WRITE: &str = "write";
}
