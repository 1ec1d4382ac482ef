//! Results of rendering one module for one target.

use std::fmt;

use polyglot_ir::{Language, NodeKind};
use serde::Serialize;

/// A declaration left out of the output because the target cannot express it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDeclaration {
    /// Namespace-qualified name, e.g. `Foo::greet`.
    pub name: String,
    pub kind: NodeKind,
    pub target: Language,
    pub reason: String,
}

impl fmt::Display for SkippedDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skipped {} '{}' for {}: {}",
            self.kind.as_str(),
            self.name,
            self.target.display_name(),
            self.reason
        )
    }
}

/// A rendered module.
#[derive(Debug, Clone)]
pub struct ModuleOutput {
    pub module_name: String,
    pub target: Language,
    pub content: String,
    pub skipped: Vec<SkippedDeclaration>,
}

impl ModuleOutput {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
