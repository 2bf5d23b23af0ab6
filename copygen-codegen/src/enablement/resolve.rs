//! Precedence rules between the two marker dialects.

use serde::Serialize;

use super::{
    dialect::{Dialect, PackageMarkers, TypeMarkers},
    markers::ROOT_OBJECT_INTERFACE,
};

/// Whether generation is enabled by default for the package's types.
///
/// The legacy payload counts only when its first comma-separated token is
/// exactly `package`.
pub fn package_enabled(markers: &PackageMarkers) -> bool {
    match &markers.generate {
        Dialect::Current(enabled) => *enabled,
        Dialect::Legacy(raw) => raw.split(',').next() == Some("package"),
        Dialect::Absent => false,
    }
}

/// Whether the type declares that it implements the root object interface.
pub fn implements_root_interface(markers: &TypeMarkers) -> bool {
    match &markers.object_root {
        Dialect::Current(root) => *root,
        Dialect::Legacy(interfaces) => interfaces.iter().any(|i| i == ROOT_OBJECT_INTERFACE),
        Dialect::Absent => false,
    }
}

/// Whether copy methods should be generated for the type.
///
/// An explicit type marker wins. Without one, the type follows the package
/// default, and root objects are always enabled.
pub fn type_enabled(package_default: bool, markers: &TypeMarkers) -> bool {
    match &markers.generate {
        Dialect::Current(enabled) => *enabled,
        Dialect::Legacy(raw) => raw == "true",
        Dialect::Absent => package_default || implements_root_interface(markers),
    }
}

/// The resolved outcome for one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnablementDecision {
    pub generate_copy: bool,
    pub implements_root_interface: bool,
}

/// Resolve both enablement questions for a type.
pub fn decide(package_default: bool, markers: &TypeMarkers) -> EnablementDecision {
    EnablementDecision {
        generate_copy: type_enabled(package_default, markers),
        implements_root_interface: implements_root_interface(markers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(generate: Dialect<bool, String>) -> PackageMarkers {
        PackageMarkers { generate }
    }

    fn ty(generate: Dialect<bool, String>, object_root: Dialect<bool, Vec<String>>) -> TypeMarkers {
        TypeMarkers {
            generate,
            object_root,
        }
    }

    fn legacy(raw: &str) -> Dialect<bool, String> {
        Dialect::Legacy(raw.to_string())
    }

    #[test]
    fn test_package_current_wins() {
        assert!(package_enabled(&pkg(Dialect::Current(true))));
        assert!(!package_enabled(&pkg(Dialect::Current(false))));
    }

    #[test]
    fn test_package_legacy_first_token() {
        assert!(package_enabled(&pkg(legacy("package"))));
        assert!(package_enabled(&pkg(legacy("package,register"))));
        assert!(!package_enabled(&pkg(legacy("register,package"))));
        assert!(!package_enabled(&pkg(legacy(" package"))));
        assert!(!package_enabled(&pkg(legacy(""))));
        assert!(!package_enabled(&pkg(Dialect::Absent)));
    }

    #[test]
    fn test_type_current_overrides_package_and_root() {
        let markers = ty(Dialect::Current(false), Dialect::Current(true));
        assert!(!type_enabled(true, &markers));
        assert!(implements_root_interface(&markers));

        let markers = ty(Dialect::Current(true), Dialect::Absent);
        assert!(type_enabled(false, &markers));
    }

    #[test]
    fn test_type_legacy_exact_true() {
        assert!(type_enabled(false, &ty(legacy("true"), Dialect::Absent)));
        assert!(!type_enabled(true, &ty(legacy("false"), Dialect::Absent)));
        assert!(!type_enabled(true, &ty(legacy("TRUE"), Dialect::Absent)));
        assert!(!type_enabled(true, &ty(legacy(""), Dialect::Absent)));
    }

    #[test]
    fn test_type_falls_back_to_package_or_root() {
        assert!(type_enabled(true, &ty(Dialect::Absent, Dialect::Absent)));
        assert!(!type_enabled(false, &ty(Dialect::Absent, Dialect::Absent)));
        assert!(type_enabled(false, &ty(Dialect::Absent, Dialect::Current(true))));
        assert!(!type_enabled(false, &ty(Dialect::Absent, Dialect::Current(false))));
    }

    #[test]
    fn test_root_legacy_matches_exact_interface() {
        let root = ty(
            Dialect::Absent,
            Dialect::Legacy(vec![
                "example.com/other.Interface".to_string(),
                ROOT_OBJECT_INTERFACE.to_string(),
            ]),
        );
        assert!(implements_root_interface(&root));
        assert!(type_enabled(false, &root));

        let not_root = ty(
            Dialect::Absent,
            Dialect::Legacy(vec!["k8s.io/apimachinery/pkg/runtime.Objects".to_string()]),
        );
        assert!(!implements_root_interface(&not_root));
    }

    #[test]
    fn test_decide() {
        let decision = decide(false, &ty(Dialect::Absent, Dialect::Current(true)));
        assert_eq!(
            decision,
            EnablementDecision {
                generate_copy: true,
                implements_root_interface: true,
            }
        );

        let decision = decide(true, &ty(Dialect::Current(false), Dialect::Absent));
        assert!(!decision.generate_copy);
        assert!(!decision.implements_root_interface);
    }
}
