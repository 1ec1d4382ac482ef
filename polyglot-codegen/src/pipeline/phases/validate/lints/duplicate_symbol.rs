//! Lint for linkage names bound more than once.

use indexmap::IndexMap;
use polyglot_manifest::{Declaration, Manifest};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when two declarations share a mangled name.
///
/// Every binding links against its mangled name, so a duplicate would bind
/// two declarations to the same symbol.
pub struct DuplicateSymbolLint;

impl Lint for DuplicateSymbolLint {
    fn name(&self) -> &'static str {
        "duplicate-symbol"
    }

    fn description(&self) -> &'static str {
        "Detect declarations bound to the same linkage name"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen: IndexMap<&str, String> = IndexMap::new();

        for decl in &manifest.declarations {
            for (mangled, owner) in linkage_names(decl) {
                if let Some(first) = seen.get(mangled) {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "linkage name '{}' of '{}' is already bound by '{}'",
                                mangled, owner, first
                            ),
                        )
                        .at(decl.location())
                        .for_declaration(decl.qualified_name()),
                    );
                } else {
                    seen.insert(mangled, owner);
                }
            }
        }
    }
}

/// Every `(mangled, qualified owner)` pair a declaration links against.
fn linkage_names(decl: &Declaration) -> Vec<(&str, String)> {
    match decl {
        Declaration::Function(f) => vec![(f.mangled.as_str(), decl.qualified_name())],
        Declaration::Class(c) => {
            let class = decl.qualified_name();
            c.constructors
                .iter()
                .chain(c.destructor.iter())
                .chain(c.methods.iter())
                .map(|m| (m.mangled.as_str(), format!("{}::{}", class, m.name)))
                .collect()
        }
        Declaration::Enum(_) | Declaration::Variable(_) => Vec::new(),
    }
}
