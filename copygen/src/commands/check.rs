use std::path::PathBuf;

use clap::Args;
use copygen_manifest::CopygenToml;
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to copygen.toml (defaults to ./copygen.toml)
    #[arg(short, long, default_value = "copygen.toml")]
    pub config: PathBuf,

    /// Print the resolved plans as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let file = CopygenToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(file.manifest(), &self.config)?;

        if self.json {
            let json =
                serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
