//! Core operations.
//!
//! This module contains the business logic for copygen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod markers;

pub use check::check;
pub use generate::generate;
pub use markers::markers;
