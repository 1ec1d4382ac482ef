use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use polyglot_codegen::generation::Timestamp;
use polyglot_ir::Language;

use super::open_manifest;
use crate::{
    language::DEFAULT_TARGETS,
    ops::{self, GenerateRequest},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to polyglot.toml (defaults to ./polyglot.toml)
    #[arg(short, long, default_value = "polyglot.toml")]
    pub config: PathBuf,

    /// Output directory (overrides [generate] output, defaults to ./bindings)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target language, repeatable (overrides [generate] targets)
    #[arg(short = 'l', long = "language")]
    pub languages: Vec<Language>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Fixed banner timestamp, for reproducible output
    #[arg(long)]
    pub timestamp: Option<String>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let manifest = open_manifest(&self.config);
        let config = &manifest.generate;

        // Flags win over the manifest, which wins over the defaults.
        let targets = if !self.languages.is_empty() {
            self.languages.clone()
        } else if !config.targets.is_empty() {
            config.targets.clone()
        } else {
            DEFAULT_TARGETS.to_vec()
        };
        let output_dir = self
            .output
            .clone()
            .or_else(|| config.output.clone())
            .unwrap_or_else(|| PathBuf::from("bindings"));
        let timestamp = self
            .timestamp
            .clone()
            .or_else(|| config.timestamp.clone())
            .map_or(Timestamp::Now, Timestamp::Fixed);

        let report = ops::generate(
            &manifest,
            GenerateRequest {
                output_dir: &output_dir,
                targets: &targets,
                dry_run: self.dry_run,
                timestamp,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        if report.has_failures() {
            std::process::exit(1);
        }
        Ok(())
    }
}
