//! Manifest types and parsing for polyglot.toml files.

mod parse;
mod validate;

use std::path::PathBuf;

use polyglot_ir::Language;
use serde::Deserialize;
pub use validate::ParseContext;

use crate::Declaration;

/// Root of a declaration manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Where the declarations came from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Generation defaults; command-line flags take precedence.
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Declarations in discovery order.
    #[serde(default, rename = "decl")]
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Language the declarations were extracted from.
    #[serde(default = "default_source_language")]
    pub language: Language,

    /// Headers the C++ proxy shim includes instead of forward declaring
    /// the proxied functions.
    #[serde(default)]
    pub headers: Vec<String>,
}

fn default_source_language() -> Language {
    Language::Cpp
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            language: default_source_language(),
            headers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Target languages to generate bindings for.
    #[serde(default)]
    pub targets: Vec<Language>,

    /// Output directory for generated files.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Fixed banner timestamp for reproducible output.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Manifest {
    /// Names of the modules the declarations will be grouped into, in
    /// discovery order.
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for decl in &self.declarations {
            let name = polyglot_ir::module_name(decl.file());
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}
