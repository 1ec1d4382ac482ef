use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};

use super::open_manifest;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    /// Path to polyglot.toml (defaults to ./polyglot.toml)
    #[arg(short, long, default_value = "polyglot.toml")]
    pub config: PathBuf,

    /// Print the module trees as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = open_manifest(&self.config);
        let report = ops::list(&manifest)?;

        if self.json {
            let json = serde_json::to_string_pretty(&report.registry)
                .wrap_err("Failed to serialize module trees")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
