//! Marker-driven deepcopy generation pipeline.
//!
//! This crate decides which types of a package get copy methods and turns the
//! per-type output of a language backend into one deterministic, formatted
//! file per package.
//!
//! # Module Organization
//!
//! - [`enablement`] - Marker definitions and the dialect precedence rules
//! - [`pipeline`] - The [`Generator`] orchestrator, diagnostics and reports
//! - [`generation`] - Import aliases, assembly and output finalization
//! - [`language`] - Traits implemented by language backends and formatters
//! - [`builder`] - Indented code building
//! - [`testing`] - Fake backends and formatters (feature-gated)
//!
//! [`Generator`]: pipeline::Generator

pub mod builder;
pub mod enablement;
pub mod generation;
pub mod language;
pub mod pipeline;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
