//! Lint for enums without enumerators.

use polyglot_manifest::{Declaration, Manifest};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about enums declared without enumerators.
///
/// Such enums are usually forward declarations the front-end picked up
/// before seeing the definition.
pub struct EmptyEnumLint;

impl Lint for EmptyEnumLint {
    fn name(&self) -> &'static str {
        "empty-enum"
    }

    fn description(&self) -> &'static str {
        "Warn about enums that declare no enumerators"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        for decl in &manifest.declarations {
            let Declaration::Enum(e) = decl else {
                continue;
            };
            if e.enumerators.is_empty() {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!("enum '{}' has no enumerators", decl.qualified_name()),
                    )
                    .at(decl.location())
                    .for_declaration(decl.qualified_name()),
                );
            }
        }
    }
}
