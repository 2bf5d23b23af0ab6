//! Output management: imports, assembly and finalization.

mod assemble;
mod imports;
mod output;

pub use assemble::GeneratedUnits;
pub use imports::ImportAliasTable;
pub use output::{HeaderParts, OutputUnit, finalize};
