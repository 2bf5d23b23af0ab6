use std::path::PathBuf;

use clap::Args;
use copygen_manifest::{CopygenToml, FormatterKind};
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, generate::GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to copygen.toml (defaults to ./copygen.toml)
    #[arg(short, long, default_value = "copygen.toml")]
    pub config: PathBuf,

    /// License header file (overrides copygen.toml)
    #[arg(long)]
    pub header_file: Option<PathBuf>,

    /// Year substituted into the header (overrides copygen.toml)
    #[arg(long)]
    pub year: Option<String>,

    /// Formatter: gofmt, builtin or none (overrides copygen.toml)
    #[arg(short, long)]
    pub formatter: Option<FormatterKind>,

    /// Print generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let file = CopygenToml::open(&self.config).unwrap_or_exit();

        let report = ops::generate(
            &file,
            GenerateOptions {
                header_file: self.header_file.as_deref(),
                year: self.year.as_deref(),
                formatter: self.formatter,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());

        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
