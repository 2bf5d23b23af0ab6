//! The markers that drive deepcopy generation.

use copygen_markers::{MarkerDefinition, MarkerError, MarkerHelp, MarkerRegistry, Shape, Target};

/// Fully qualified name of the root object interface.
pub const ROOT_OBJECT_INTERFACE: &str = "k8s.io/apimachinery/pkg/runtime.Object";

/// `+kubebuilder:object:generate` on a package.
pub const ENABLE_PACKAGE: MarkerDefinition =
    MarkerDefinition::new("kubebuilder:object:generate", Target::Package, Shape::Flag);

/// `+kubebuilder:object:generate` on a type.
pub const ENABLE_TYPE: MarkerDefinition =
    MarkerDefinition::new("kubebuilder:object:generate", Target::Type, Shape::Flag);

/// `+kubebuilder:object:root` on a type.
pub const IS_OBJECT: MarkerDefinition =
    MarkerDefinition::new("kubebuilder:object:root", Target::Type, Shape::Flag);

/// `+k8s:deepcopy-gen` on a package. The payload is kept raw.
pub const LEGACY_ENABLE_PACKAGE: MarkerDefinition =
    MarkerDefinition::new("k8s:deepcopy-gen", Target::Package, Shape::Raw).legacy();

/// `+k8s:deepcopy-gen` on a type. The payload is kept raw.
pub const LEGACY_ENABLE_TYPE: MarkerDefinition =
    MarkerDefinition::new("k8s:deepcopy-gen", Target::Type, Shape::Raw).legacy();

/// `+k8s:deepcopy-gen:interfaces` on a type; may repeat.
pub const LEGACY_IS_OBJECT: MarkerDefinition =
    MarkerDefinition::new("k8s:deepcopy-gen:interfaces", Target::Type, Shape::String).legacy();

/// Register every enablement marker, with help text, into `registry`.
///
/// # Errors
///
/// Fails if any of the names is already registered for the same target.
pub fn register_markers(registry: &mut MarkerRegistry) -> Result<(), MarkerError> {
    registry.register_all([
        ENABLE_PACKAGE,
        ENABLE_TYPE,
        IS_OBJECT,
        LEGACY_ENABLE_PACKAGE,
        LEGACY_ENABLE_TYPE,
        LEGACY_IS_OBJECT,
    ])?;

    registry.add_help(
        &ENABLE_PACKAGE,
        MarkerHelp::simple(
            "object",
            "enables or disables object interface & deepcopy implementation generation for this package",
        ),
    );
    registry.add_help(
        &ENABLE_TYPE,
        MarkerHelp::simple(
            "object",
            "overrides enabling or disabling deepcopy generation for this type",
        ),
    );
    registry.add_help(
        &IS_OBJECT,
        MarkerHelp::simple(
            "object",
            "enables object interface implementation generation for this type",
        ),
    );
    registry.add_help(
        &LEGACY_ENABLE_PACKAGE,
        MarkerHelp::deprecated(
            ENABLE_PACKAGE.name,
            "object",
            "enables or disables object interface & deepcopy implementation generation for this package",
        ),
    );
    registry.add_help(
        &LEGACY_ENABLE_TYPE,
        MarkerHelp::deprecated(
            ENABLE_TYPE.name,
            "object",
            "overrides enabling or disabling deepcopy generation for this type",
        ),
    );
    registry.add_help(
        &LEGACY_IS_OBJECT,
        MarkerHelp::deprecated(
            IS_OBJECT.name,
            "object",
            "enables object interface implementation generation for this type",
        ),
    );

    Ok(())
}

/// A fresh registry holding only the enablement markers.
pub fn marker_registry() -> Result<MarkerRegistry, MarkerError> {
    let mut registry = MarkerRegistry::new();
    register_markers(&mut registry)?;
    Ok(registry)
}
