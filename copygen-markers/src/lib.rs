//! Marker comment registry and parsing.
//!
//! Markers are declarative annotations written as comments on a package or a
//! type declaration, e.g. `+kubebuilder:object:generate=true`. This crate
//! knows how to register marker definitions, describe them for
//! documentation tooling, and parse raw marker comments into typed values.
//!
//! # Example
//!
//! ```
//! use copygen_markers::{MarkerDefinition, MarkerRegistry, Shape, Target};
//!
//! const ROOT: MarkerDefinition =
//!     MarkerDefinition::new("kubebuilder:object:root", Target::Type, Shape::Flag);
//!
//! let mut registry = MarkerRegistry::new();
//! registry.register(ROOT).unwrap();
//!
//! let values = registry
//!     .collect(Target::Type, &["+kubebuilder:object:root".to_string()])
//!     .unwrap();
//! assert_eq!(values.get(ROOT.name).and_then(|v| v.as_flag()), Some(true));
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod collect;
mod definition;
mod error;
mod registry;
mod value;

pub use collect::MarkerValues;
pub use definition::{MarkerDefinition, MarkerHelp, Shape, Target};
pub use error::MarkerError;
pub use registry::MarkerRegistry;
pub use value::{MarkerValue, split_marker};
