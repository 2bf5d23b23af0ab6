//! The per-package orchestrator.

use std::collections::{BTreeSet, HashSet};

use copygen_core::{OutputSink, substitute_year, write_output};
use copygen_ir::Package;
use copygen_markers::{MarkerError, MarkerRegistry};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use super::{
    context::PackageContext,
    phase,
    report::{PackageOutcome, PackageReport, RunReport},
};
use crate::{
    builder::CodeBuilder,
    enablement::{EnablementDecision, PackageMarkers, TypeMarkers, decide, package_enabled},
    generation::{GeneratedUnits, HeaderParts, ImportAliasTable, OutputUnit, finalize},
    language::{Eligibility, LanguageBackend, SourceFormatter, SynthesisRequest},
};

/// Problems that stop a package before any type is generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("invalid package marker: {0}")]
    PackageMarker(#[source] MarkerError),

    #[error("invalid marker on type '{type_name}': {source}")]
    TypeMarker {
        type_name: String,
        #[source]
        source: MarkerError,
    },

    #[error("types declared more than once: {}", names.join(", "))]
    DuplicateTypes { names: Vec<String> },
}

impl PlanError {
    /// Record this error against the package, once per affected type.
    pub fn report(&self, ctx: &mut PackageContext) {
        match self {
            Self::PackageMarker(_) => ctx.add_error(phase::MARKERS, self.to_string()),
            Self::TypeMarker { type_name, .. } => {
                ctx.add_type_error(phase::MARKERS, type_name, self.to_string())
            }
            Self::DuplicateTypes { names } => {
                for name in names {
                    ctx.add_type_error(
                        phase::MARKERS,
                        name,
                        format!("type '{}' is declared more than once", name),
                    );
                }
            }
        }
    }
}

/// Resolved enablement for every type of a package, before synthesis.
#[derive(Debug, Clone, Serialize)]
pub struct PackagePlan {
    pub package: String,
    /// Package-level default from the package markers.
    pub enabled_by_default: bool,
    /// Types in ordinal name order.
    pub types: Vec<TypePlan>,
}

impl PackagePlan {
    /// Types that will be handed to the synthesizer.
    pub fn selected(&self) -> impl Iterator<Item = &TypePlan> {
        self.types.iter().filter(|t| t.is_selected())
    }
}

/// Enablement and eligibility of one type.
#[derive(Debug, Clone, Serialize)]
pub struct TypePlan {
    pub name: String,
    pub kind: &'static str,
    pub decision: EnablementDecision,
    /// Only evaluated for enabled types.
    pub eligibility: Option<Eligibility>,
}

impl TypePlan {
    pub fn is_selected(&self) -> bool {
        self.decision.generate_copy
            && self
                .eligibility
                .as_ref()
                .is_some_and(Eligibility::is_eligible)
    }
}

/// What generation produced for a package, before anything is written.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// A fatal error was recorded; nothing was generated.
    Aborted,
    /// No type produced output.
    Nothing,
    Generated(OutputUnit),
}

/// Output and diagnostics for one package.
#[derive(Debug)]
pub struct PackageGeneration {
    pub outcome: GenerationOutcome,
    pub context: PackageContext,
}

/// Drives marker resolution, synthesis, assembly and formatting for a set of
/// packages.
///
/// # Example
///
/// ```ignore
/// let registry = marker_registry()?;
/// let generator = Generator::new(&registry, &GoBackend, &GoFmt)
///     .with_header(&license, "2024");
/// let report = generator.run(&packages, &FileSink::new("."));
/// ```
pub struct Generator<'a> {
    registry: &'a MarkerRegistry,
    backend: &'a dyn LanguageBackend,
    formatter: &'a dyn SourceFormatter,
    header: String,
    output_file: String,
}

impl<'a> Generator<'a> {
    pub fn new(
        registry: &'a MarkerRegistry,
        backend: &'a dyn LanguageBackend,
        formatter: &'a dyn SourceFormatter,
    ) -> Self {
        Self {
            registry,
            backend,
            formatter,
            header: String::new(),
            output_file: backend.default_output_file().to_string(),
        }
    }

    /// Use `header` as the license text, with ` YEAR` replaced by `year`.
    pub fn with_header(mut self, header: &str, year: &str) -> Self {
        self.header = substitute_year(header, year);
        self
    }

    /// Write generated code to `file_name` inside each package directory.
    pub fn with_output_file(mut self, file_name: impl Into<String>) -> Self {
        self.output_file = file_name.into();
        self
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    /// Resolve enablement and eligibility for every type of `package`.
    ///
    /// All markers are parsed up front, so a malformed marker anywhere in the
    /// package fails the whole plan.
    pub fn plan(&self, package: &Package) -> Result<PackagePlan, PlanError> {
        let package_markers = PackageMarkers::collect(self.registry, &package.markers)
            .map_err(PlanError::PackageMarker)?;
        let enabled_by_default = package_enabled(&package_markers);

        let mut seen = HashSet::new();
        let duplicates: BTreeSet<&str> = package
            .types
            .iter()
            .filter(|ty| !seen.insert(ty.name.as_str()))
            .map(|ty| ty.name.as_str())
            .collect();
        if !duplicates.is_empty() {
            return Err(PlanError::DuplicateTypes {
                names: duplicates.into_iter().map(str::to_string).collect(),
            });
        }

        let mut resolved = Vec::with_capacity(package.types.len());
        for ty in &package.types {
            let markers = TypeMarkers::collect(self.registry, &ty.markers).map_err(|source| {
                PlanError::TypeMarker {
                    type_name: ty.name.clone(),
                    source,
                }
            })?;
            resolved.push((ty, decide(enabled_by_default, &markers)));
        }

        let mut types: Vec<TypePlan> = resolved
            .into_iter()
            .map(|(ty, decision)| TypePlan {
                name: ty.name.clone(),
                kind: ty.kind.as_str(),
                decision,
                eligibility: decision
                    .generate_copy
                    .then(|| self.backend.eligibility(package, ty)),
            })
            .collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(PackagePlan {
            package: package.name.clone(),
            enabled_by_default,
            types,
        })
    }

    /// Generate the output for one package without writing it.
    pub fn generate_for_package(&self, package: &Package) -> PackageGeneration {
        let mut ctx = PackageContext::new(&package.name);

        let plan = match self.plan(package) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(error = %err, "package aborted");
                err.report(&mut ctx);
                return PackageGeneration {
                    outcome: GenerationOutcome::Aborted,
                    context: ctx,
                };
            }
        };

        let mut imports = ImportAliasTable::new(&package.name);
        let mut units = GeneratedUnits::new();

        for type_plan in &plan.types {
            let name = type_plan.name.as_str();
            if !type_plan.decision.generate_copy {
                debug!(type_name = name, "generation not enabled");
                continue;
            }
            match &type_plan.eligibility {
                Some(Eligibility::Eligible) => {}
                Some(Eligibility::Skipped(reason)) => {
                    debug!(type_name = name, reason = %reason, "skipping ineligible type");
                    continue;
                }
                Some(Eligibility::Invalid(message)) => {
                    ctx.add_type_error(phase::ELIGIBILITY, name, message.clone());
                    continue;
                }
                None => continue,
            }

            let Some(ty) = package.find_type(name) else {
                continue;
            };
            let request = SynthesisRequest {
                package,
                ty,
                decision: type_plan.decision,
            };

            let before = imports.clone();
            let mut out = CodeBuilder::new(self.backend.indent());
            match self.backend.synthesize(&request, &mut imports, &mut out) {
                Ok(()) if out.is_empty() => debug!(type_name = name, "nothing to generate"),
                Ok(()) => {
                    debug!(
                        type_name = name,
                        root = type_plan.decision.implements_root_interface,
                        "synthesized"
                    );
                    units.insert(name, out.build().into_bytes());
                }
                Err(err) => {
                    warn!(type_name = name, error = %err, "synthesis failed");
                    imports = before;
                    ctx.add_type_error(phase::SYNTHESIS, name, err.to_string());
                }
            }
        }

        if units.is_empty() {
            return PackageGeneration {
                outcome: GenerationOutcome::Nothing,
                context: ctx,
            };
        }

        let body = units.assemble();
        let import_specs = imports.import_specs();
        let header = HeaderParts {
            license: &self.header,
            package_name: &package.name,
            import_specs: &import_specs,
        };
        let output = finalize(self.backend, self.formatter, &header, &body);
        if let OutputUnit::RawFallback { error, .. } = &output {
            ctx.add_warning(
                phase::FORMAT,
                format!(
                    "{} failed, writing unformatted source: {}",
                    self.formatter.name(),
                    error
                ),
            );
        }

        PackageGeneration {
            outcome: GenerationOutcome::Generated(output),
            context: ctx,
        }
    }

    /// Generate every package and write the results through `sink`.
    ///
    /// A failing package never stops the others.
    pub fn run(&self, packages: &[Package], sink: &dyn OutputSink) -> RunReport {
        let mut report = RunReport::default();

        for package in packages {
            let span = info_span!("package", name = %package.name, dir = %package.dir.display());
            let _guard = span.enter();

            let PackageGeneration {
                outcome,
                context: mut ctx,
            } = self.generate_for_package(package);

            let outcome = match outcome {
                GenerationOutcome::Aborted => PackageOutcome::Failed,
                GenerationOutcome::Nothing => {
                    debug!("no output");
                    PackageOutcome::Nothing
                }
                GenerationOutcome::Generated(unit) => {
                    let formatted = unit.is_formatted();
                    match write_output(sink, &package.dir, &self.output_file, unit.bytes()) {
                        Ok(path) => {
                            info!(path = %path.display(), formatted, "wrote generated code");
                            PackageOutcome::Written { path, formatted }
                        }
                        Err(err) => {
                            warn!(error = %err, "write failed");
                            ctx.add_error(phase::WRITE, error_chain(&err));
                            PackageOutcome::Failed
                        }
                    }
                }
            };

            report.packages.push(PackageReport {
                name: package.name.clone(),
                dir: package.dir.clone(),
                outcome,
                diagnostics: ctx.into_diagnostics(),
            });
        }

        report
    }
}

/// An error message followed by each of its sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
