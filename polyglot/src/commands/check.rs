use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::open_manifest;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to polyglot.toml (defaults to ./polyglot.toml)
    #[arg(short, long, default_value = "polyglot.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = open_manifest(&self.config);
        let report = ops::check(&manifest, &self.config);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
