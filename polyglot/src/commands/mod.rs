mod check;
mod completions;
mod generate;
mod list;

use std::path::Path;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use list::ListCommand;
use polyglot_manifest::Manifest;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for polyglot_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Load the manifest, exiting with a rendered diagnostic when it is invalid.
pub(crate) fn open_manifest(path: &Path) -> Manifest {
    Manifest::from_file(path).unwrap_or_exit()
}

#[derive(Parser)]
#[command(name = "polyglot")]
#[command(version)]
#[command(about = "Generate foreign-language bindings from C++ declarations")]
pub(crate) struct Cli {
    /// Log pipeline and generator activity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bindings from polyglot.toml
    Generate(GenerateCommand),

    /// Validate polyglot.toml without generating bindings
    Check(CheckCommand),

    /// List the modules and declarations defined in polyglot.toml
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
