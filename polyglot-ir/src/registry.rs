//! Module name derivation and the module → AST map.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{Ast, Language, Node};

/// Source file extensions stripped when deriving a module name.
///
/// Checked in order. Headers are not sources, so `.hpp` and `.h` stay part
/// of the module name.
pub const SOURCE_EXTENSIONS: &[&str] = &[".cpp", ".cxx", ".c++", ".zig", ".cc", ".rs", ".C", ".d"];

/// Derive a module name from an originating file name.
///
/// Strips the first matching source extension, then everything up to the
/// last `/` or `\`.
pub fn module_name(filename: &str) -> &str {
    let stem = SOURCE_EXTENSIONS
        .iter()
        .find_map(|ext| filename.strip_suffix(ext))
        .unwrap_or(filename);
    match stem.rfind(['/', '\\']) {
        Some(idx) => &stem[idx + 1..],
        None => stem,
    }
}

/// Every module discovered during extraction, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleRegistry {
    language: Language,
    modules: IndexMap<String, Ast>,
}

impl ModuleRegistry {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            modules: IndexMap::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Locate or create the AST for the module derived from `filename`.
    pub fn module_mut(&mut self, filename: &str) -> &mut Ast {
        let name = module_name(filename);
        let language = self.language;
        self.modules
            .entry(name.to_string())
            .or_insert_with(|| Ast::new(name, language))
    }

    /// Add a declaration from `filename` under a namespace path.
    pub fn insert<S: AsRef<str>>(&mut self, filename: &str, namespace: &[S], node: Node) {
        self.module_mut(filename).insert(namespace, node);
    }

    pub fn get(&self, module: &str) -> Option<&Ast> {
        self.modules.get(module)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Ast> {
        self.modules.values()
    }

    pub fn modules_mut(&mut self) -> impl Iterator<Item = &mut Ast> {
        self.modules.values_mut()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnumNode, NodeKind};

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("src/example.cpp"), "example");
        assert_eq!(module_name("C:\\code\\lib\\widget.cxx"), "widget");
        assert_eq!(module_name("math.cc"), "math");
        assert_eq!(module_name("dir/Shape.C"), "Shape");
        assert_eq!(module_name("lib.rs"), "lib");
        assert_eq!(module_name("mod.d"), "mod");
        assert_eq!(module_name("include/api.hpp"), "api.hpp");
        assert_eq!(module_name("io.h"), "io.h");
        assert_eq!(module_name("no_extension"), "no_extension");
    }

    #[test]
    fn test_declarations_from_one_file_share_a_module() {
        let mut registry = ModuleRegistry::new(Language::Cpp);
        registry.insert::<&str>("src/a.cpp", &[], EnumNode::new("One").into());
        registry.insert::<&str>("other/a.cpp", &[], EnumNode::new("Two").into());
        registry.insert::<&str>("src/b.cpp", &[], EnumNode::new("Three").into());

        assert_eq!(registry.len(), 2);
        let a = registry.get("a").unwrap();
        assert_eq!(a.nodes.len(), 2);
        assert_eq!(a.module_name, "a");
        assert!(a.nodes.iter().all(|n| n.kind() == NodeKind::Enum));

        let order: Vec<_> = registry.modules().map(|m| m.module_name.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }
}
