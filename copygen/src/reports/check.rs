//! Check command report data structures.

use std::path::PathBuf;

use copygen_codegen::{
    language::Eligibility,
    pipeline::{Diagnostic, PackagePlan, TypePlan},
};
use serde::Serialize;

use super::{
    diagnostics::render_diagnostic,
    output::{Output, Report},
};

/// Report data from resolving every package without generating.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub packages: Vec<PackageCheck>,
}

/// Marker resolution for one package.
#[derive(Debug, Serialize)]
pub struct PackageCheck {
    pub name: String,
    pub dir: PathBuf,
    /// Missing when the package's markers could not be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PackagePlan>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.packages
            .iter()
            .flat_map(|p| &p.diagnostics)
            .all(|d| !d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        let mut any = false;
        for diag in self.packages.iter().flat_map(|p| &p.diagnostics) {
            render_diagnostic(out, diag);
            any = true;
        }
        if any {
            out.newline();
        }

        for package in &self.packages {
            out.section(&format!("{} ({})", package.name, package.dir.display()));
            match &package.plan {
                Some(plan) => {
                    if plan.enabled_by_default {
                        out.preformatted("  generation enabled for the package");
                    }
                    for ty in &plan.types {
                        out.list_item(&format!("{} ({}): {}", ty.name, ty.kind, type_status(ty)));
                    }
                }
                None => out.list_item("not resolved"),
            }
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        }
    }
}

fn type_status(ty: &TypePlan) -> String {
    if !ty.decision.generate_copy {
        return "disabled".to_string();
    }
    match &ty.eligibility {
        Some(Eligibility::Skipped(reason)) => format!("skipped, {}", reason),
        Some(Eligibility::Invalid(_)) => "invalid".to_string(),
        Some(Eligibility::Eligible) | None if ty.decision.implements_root_interface => {
            "generate, root object".to_string()
        }
        Some(Eligibility::Eligible) | None => "generate".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use copygen_codegen::enablement::EnablementDecision;

    use super::*;
    use crate::reports::BufferOutput;

    fn type_plan(
        name: &str,
        generate_copy: bool,
        root: bool,
        eligibility: Option<Eligibility>,
    ) -> TypePlan {
        TypePlan {
            name: name.to_string(),
            kind: "struct",
            decision: EnablementDecision {
                generate_copy,
                implements_root_interface: root,
            },
            eligibility,
        }
    }

    fn report(diagnostics: Vec<Diagnostic>) -> CheckReport {
        CheckReport {
            config_path: PathBuf::from("copygen.toml"),
            packages: vec![PackageCheck {
                name: "v1".to_string(),
                dir: PathBuf::from("api/v1"),
                plan: Some(PackagePlan {
                    package: "v1".to_string(),
                    enabled_by_default: true,
                    types: vec![
                        type_plan("Hidden", false, false, None),
                        type_plan("Widget", true, true, Some(Eligibility::Eligible)),
                        type_plan(
                            "internal",
                            true,
                            false,
                            Some(Eligibility::Skipped("unexported type".to_string())),
                        ),
                    ],
                }),
                diagnostics,
            }],
        }
    }

    #[test]
    fn test_render_valid() {
        let report = report(vec![]);
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(report.is_valid());
        assert_eq!(
            out.lines,
            vec![
                "v1 (api/v1):",
                "  generation enabled for the package",
                "  - Hidden (struct): disabled",
                "  - Widget (struct): generate, root object",
                "  - internal (struct): skipped, unexported type",
                "",
                "✓ copygen.toml is valid",
            ]
        );
    }

    #[test]
    fn test_render_errors() {
        let report = report(vec![Diagnostic::error("eligibility", "bad pointer").at("v1.Ptr")]);
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(!report.is_valid());
        assert_eq!(out.lines[0], "error: bad pointer\n  --> v1.Ptr");
        assert!(!out.text().contains("is valid"));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(report(vec![])).unwrap();
        let types = &json["packages"][0]["plan"]["types"];
        assert_eq!(types[1]["name"], "Widget");
        assert_eq!(types[1]["decision"]["implements_root_interface"], true);
        assert_eq!(types[2]["eligibility"]["status"], "skipped");
        assert_eq!(types[2]["eligibility"]["reason"], "unexported type");
    }
}
