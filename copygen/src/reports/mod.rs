//! Report data structures for commands.
//!
//! Operations build reports, commands render them to an [`Output`] target.

mod check;
mod diagnostics;
mod generate;
mod markers;
mod output;

pub use check::{CheckReport, PackageCheck};
pub use generate::{GenerateReport, GenerationResult, PreviewFile};
pub use markers::{MarkerInfo, MarkersReport};
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Output, Report, TerminalOutput};
