use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct MarkersCommand {}

impl MarkersCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::markers()?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
