//! Lint for overloaded free functions.

use indexmap::IndexMap;
use polyglot_ir::module_name;
use polyglot_manifest::{Declaration, Manifest};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns when a free function name is declared more than once in
/// the same module and namespace.
///
/// Rust and Zig have no overloading, so every overload after the first is
/// bound there under a numbered name (`add_1`, `add_2`, ...).
pub struct OverloadedFunctionLint;

impl Lint for OverloadedFunctionLint {
    fn name(&self) -> &'static str {
        "overloaded-function"
    }

    fn description(&self) -> &'static str {
        "Warn about overloads that are renamed in targets without overloading"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen: IndexMap<(&str, String), &str> = IndexMap::new();

        for decl in &manifest.declarations {
            let Declaration::Function(f) = decl else {
                continue;
            };
            let key = (module_name(&f.file), decl.qualified_name());
            if let Some(first) = seen.get(&key) {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "function '{}' is overloaded (first declared as '{}'); Rust and Zig bind it under a numbered name",
                            key.1, first
                        ),
                    )
                    .at(decl.location())
                    .for_declaration(decl.qualified_name()),
                );
            } else {
                seen.insert(key, &f.mangled);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overloads_in_same_module() {
        let manifest: Manifest = r#"
            [[decl]]
            kind = "function"
            file = "src/math.cpp"
            name = "add"
            mangled = "_Z3addii"

            [[decl]]
            kind = "function"
            file = "src/math.cpp"
            line = 7
            name = "add"
            mangled = "_Z3adddd"

            [[decl]]
            kind = "function"
            file = "src/other.cpp"
            name = "add"
            mangled = "_Z3addff"
        "#
        .parse()
        .unwrap();

        let mut diagnostics = Vec::new();
        OverloadedFunctionLint.check(&manifest, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
        assert!(diagnostics[0].message.contains("first declared as '_Z3addii'"));
        assert!(diagnostics[0].message.contains("numbered name"));
        assert_eq!(diagnostics[0].location.as_deref(), Some("src/math.cpp:7"));
    }
}
