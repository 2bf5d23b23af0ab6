//! Package and type model for the copygen deepcopy generator.
//!
//! This crate provides the type definitions shared by the loader and the
//! code generation pipeline.
//!
//! # Architecture
//!
//! ```text
//! copygen.toml (TOML) → copygen-manifest (loading) → copygen-ir (package model) → codegen
//! ```
//!
//! Marker comments are carried here as raw strings; interpreting them is the
//! job of `copygen-markers`.

mod package;
mod types;

pub use package::{Field, Package, TypeDecl, TypeKind};
pub use types::{TypeExpr, TypeExprError, is_basic_type, is_keyword};
