//! Typed snapshots of the enablement markers at one site.

use copygen_markers::{MarkerError, MarkerRegistry, MarkerValue, MarkerValues, Target};

use super::markers::{
    ENABLE_PACKAGE, ENABLE_TYPE, IS_OBJECT, LEGACY_ENABLE_PACKAGE, LEGACY_ENABLE_TYPE,
    LEGACY_IS_OBJECT,
};

/// Which dialect, if any, spoke at a marker site.
///
/// The current dialect wins whenever it is present, so a site never holds
/// both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dialect<C, L> {
    #[default]
    Absent,
    Current(C),
    Legacy(L),
}

impl<C, L> Dialect<C, L> {
    /// Pick the current value if present, else the legacy one.
    pub fn select(current: Option<C>, legacy: Option<L>) -> Self {
        match (current, legacy) {
            (Some(current), _) => Self::Current(current),
            (None, Some(legacy)) => Self::Legacy(legacy),
            (None, None) => Self::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Enablement markers found on a package.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageMarkers {
    /// `kubebuilder:object:generate` or the raw `k8s:deepcopy-gen` payload.
    pub generate: Dialect<bool, String>,
}

impl PackageMarkers {
    /// Parse the package's raw marker comments.
    pub fn collect(registry: &MarkerRegistry, raw: &[String]) -> Result<Self, MarkerError> {
        let values = registry.collect(Target::Package, raw)?;
        Self::from_values(&values)
    }

    pub fn from_values(values: &MarkerValues) -> Result<Self, MarkerError> {
        let current = values
            .get(ENABLE_PACKAGE.name)
            .map(|v| flag(v, ENABLE_PACKAGE.name, Target::Package))
            .transpose()?;
        let legacy = values
            .get(LEGACY_ENABLE_PACKAGE.name)
            .map(|v| raw(v, LEGACY_ENABLE_PACKAGE.name, Target::Package))
            .transpose()?;

        Ok(Self {
            generate: Dialect::select(current, legacy),
        })
    }
}

/// Enablement markers found on a type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeMarkers {
    /// `kubebuilder:object:generate` or the raw `k8s:deepcopy-gen` payload.
    pub generate: Dialect<bool, String>,
    /// `kubebuilder:object:root` or every `k8s:deepcopy-gen:interfaces` value.
    pub object_root: Dialect<bool, Vec<String>>,
}

impl TypeMarkers {
    /// Parse a type's raw marker comments.
    pub fn collect(registry: &MarkerRegistry, raw: &[String]) -> Result<Self, MarkerError> {
        let values = registry.collect(Target::Type, raw)?;
        Self::from_values(&values)
    }

    pub fn from_values(values: &MarkerValues) -> Result<Self, MarkerError> {
        let generate = values
            .get(ENABLE_TYPE.name)
            .map(|v| flag(v, ENABLE_TYPE.name, Target::Type))
            .transpose()?;
        let legacy_generate = values
            .get(LEGACY_ENABLE_TYPE.name)
            .map(|v| raw(v, LEGACY_ENABLE_TYPE.name, Target::Type))
            .transpose()?;

        let root = values
            .get(IS_OBJECT.name)
            .map(|v| flag(v, IS_OBJECT.name, Target::Type))
            .transpose()?;
        let interfaces = values
            .all(LEGACY_IS_OBJECT.name)
            .iter()
            .map(|v| string(v, LEGACY_IS_OBJECT.name, Target::Type))
            .collect::<Result<Vec<_>, _>>()?;
        let legacy_root = (!interfaces.is_empty()).then_some(interfaces);

        Ok(Self {
            generate: Dialect::select(generate, legacy_generate),
            object_root: Dialect::select(root, legacy_root),
        })
    }
}

fn flag(value: &MarkerValue, name: &str, target: Target) -> Result<bool, MarkerError> {
    value
        .as_flag()
        .ok_or_else(|| mismatch(value, name, target, "bool"))
}

fn raw(value: &MarkerValue, name: &str, target: Target) -> Result<String, MarkerError> {
    value
        .as_raw()
        .map(str::to_string)
        .ok_or_else(|| mismatch(value, name, target, "raw"))
}

fn string(value: &MarkerValue, name: &str, target: Target) -> Result<String, MarkerError> {
    value
        .as_string()
        .map(str::to_string)
        .ok_or_else(|| mismatch(value, name, target, "string"))
}

fn mismatch(
    value: &MarkerValue,
    name: &str,
    target: Target,
    expected: &'static str,
) -> MarkerError {
    MarkerError::TypeMismatch {
        name: name.to_string(),
        target,
        expected,
        found: value.kind(),
    }
}

#[cfg(test)]
mod tests {
    use copygen_markers::{MarkerDefinition, Shape};

    use super::*;
    use crate::enablement::marker_registry;

    fn markers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_prefers_current() {
        assert_eq!(Dialect::select(Some(false), Some("package")), Dialect::Current(false));
        assert_eq!(
            Dialect::<bool, &str>::select(None, Some("package")),
            Dialect::Legacy("package")
        );
        assert!(Dialect::<bool, &str>::select(None, None).is_absent());
    }

    #[test]
    fn test_package_markers() {
        let registry = marker_registry().unwrap();

        let pkg =
            PackageMarkers::collect(&registry, &markers(&["+k8s:deepcopy-gen=package,register"]))
                .unwrap();
        assert_eq!(pkg.generate, Dialect::Legacy("package,register".to_string()));

        let pkg = PackageMarkers::collect(
            &registry,
            &markers(&["+k8s:deepcopy-gen=package", "+kubebuilder:object:generate=false"]),
        )
        .unwrap();
        assert_eq!(pkg.generate, Dialect::Current(false));

        let pkg =
            PackageMarkers::collect(&registry, &markers(&["+groupName=apps.example.com"])).unwrap();
        assert!(pkg.generate.is_absent());
    }

    #[test]
    fn test_type_markers_collect_every_interface() {
        let registry = marker_registry().unwrap();
        let ty = TypeMarkers::collect(
            &registry,
            &markers(&[
                "+k8s:deepcopy-gen:interfaces=example.com/Foo",
                "+k8s:deepcopy-gen:interfaces=k8s.io/apimachinery/pkg/runtime.Object",
            ]),
        )
        .unwrap();

        assert!(ty.generate.is_absent());
        assert_eq!(
            ty.object_root,
            Dialect::Legacy(vec![
                "example.com/Foo".to_string(),
                "k8s.io/apimachinery/pkg/runtime.Object".to_string(),
            ])
        );
    }

    #[test]
    fn test_invalid_flag_payload() {
        let registry = marker_registry().unwrap();
        let err = TypeMarkers::collect(&registry, &markers(&["+kubebuilder:object:root=yes"]))
            .unwrap_err();
        assert!(matches!(err, MarkerError::InvalidPayload { .. }));
    }

    #[test]
    fn test_mismatched_shape() {
        const WRONG: MarkerDefinition =
            MarkerDefinition::new("kubebuilder:object:root", Target::Type, Shape::Raw);
        let mut registry = copygen_markers::MarkerRegistry::new();
        registry.register(WRONG).unwrap();

        let err =
            TypeMarkers::collect(&registry, &markers(&["+kubebuilder:object:root"])).unwrap_err();
        assert_eq!(
            err,
            MarkerError::TypeMismatch {
                name: "kubebuilder:object:root".to_string(),
                target: Target::Type,
                expected: "bool",
                found: "raw",
            }
        );
    }
}
