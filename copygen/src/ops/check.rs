//! Check operation - marker resolution without generation.

use std::path::Path;

use copygen_codegen::{
    enablement::marker_registry,
    language::Eligibility,
    pipeline::{Generator, PackageContext, phase},
};
use copygen_codegen_go::{GoBackend, NoopFormatter};
use copygen_manifest::Manifest;
use eyre::{Context, Result};

use crate::reports::{CheckReport, PackageCheck};

/// Execute the check operation.
///
/// Resolves markers, enablement and eligibility for every type and returns
/// the resulting plans with their diagnostics.
pub fn check(manifest: &Manifest, config_path: &Path) -> Result<CheckReport> {
    let registry = marker_registry().wrap_err("Failed to build the marker registry")?;
    let generator = Generator::new(&registry, &GoBackend, &NoopFormatter);

    let packages = manifest
        .packages
        .iter()
        .map(|package| {
            let mut ctx = PackageContext::new(&package.name);
            let plan = match generator.plan(package) {
                Ok(plan) => {
                    for ty in &plan.types {
                        if let Some(Eligibility::Invalid(message)) = &ty.eligibility {
                            ctx.add_type_error(phase::ELIGIBILITY, &ty.name, message.clone());
                        }
                    }
                    Some(plan)
                }
                Err(err) => {
                    err.report(&mut ctx);
                    None
                }
            };

            PackageCheck {
                name: package.name.clone(),
                dir: package.dir.clone(),
                plan,
                diagnostics: ctx.into_diagnostics(),
            }
        })
        .collect();

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        packages,
    })
}
