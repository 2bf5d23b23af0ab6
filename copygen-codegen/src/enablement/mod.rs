//! Marker-driven enablement.
//!
//! Two marker dialects can switch generation on or off: the current
//! `kubebuilder:object:*` markers and the deprecated `k8s:deepcopy-gen`
//! markers. At every site the current dialect takes precedence over the
//! legacy one, and the legacy one over the default.
//!
//! ```text
//! raw marker comments → MarkerRegistry::collect → PackageMarkers / TypeMarkers
//!                                                        │
//!                               package_enabled / decide ◄┘
//! ```

mod dialect;
mod markers;
mod resolve;

pub use dialect::{Dialect, PackageMarkers, TypeMarkers};
pub use markers::{
    ENABLE_PACKAGE, ENABLE_TYPE, IS_OBJECT, LEGACY_ENABLE_PACKAGE, LEGACY_ENABLE_TYPE,
    LEGACY_IS_OBJECT, ROOT_OBJECT_INTERFACE, marker_registry, register_markers,
};
pub use resolve::{
    EnablementDecision, decide, implements_root_interface, package_enabled, type_enabled,
};
