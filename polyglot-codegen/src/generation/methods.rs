//! Synthesized names for overloads in targets without overloading.

use std::collections::{HashMap, HashSet};

use polyglot_ir::{Ast, ClassNode, FunctionNode, Node};

/// One method of a class together with the names its bindings use.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodBinding<'a> {
    pub method: &'a FunctionNode,
    /// Name of the forwarding method. Overloads get a numeric suffix so the
    /// name is unique within the class.
    pub alias: String,
    /// Raw entry point taking the receiver first,
    /// `polyglot_<Class>_method_<alias>`.
    pub symbol: String,
}

/// Bindings for every method of a class, in declaration order.
///
/// The names depend only on the class, so the forwarding methods and the
/// raw declarations computed in separate passes always agree.
pub fn method_bindings(class: &ClassNode) -> Vec<MethodBinding<'_>> {
    let names: Vec<&str> = class.methods.iter().map(|m| m.name.as_str()).collect();
    class
        .methods
        .iter()
        .zip(disambiguate(&names, &HashSet::new()))
        .map(|(method, alias)| MethodBinding {
            method,
            symbol: format!("polyglot_{}_method_{}", class.name, alias),
            alias,
        })
        .collect()
}

/// Unique names for the free functions of one tree level.
///
/// The first declaration of a name keeps it; later overloads get `_1`,
/// `_2`, ... skipping names already declared at that level. Lookup is by
/// linkage name, which the validate phase keeps unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionAliases {
    renamed: HashMap<String, String>,
}

impl FunctionAliases {
    pub fn of(ast: &Ast) -> Self {
        let functions: Vec<&FunctionNode> = ast
            .nodes
            .iter()
            .filter_map(|node| match node {
                Node::Function(f) => Some(f),
                _ => None,
            })
            .collect();
        let reserved: HashSet<&str> = ast
            .nodes
            .iter()
            .filter(|node| !matches!(node, Node::Function(_)))
            .map(Node::name)
            .collect();
        let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();

        let renamed = functions
            .iter()
            .zip(disambiguate(&names, &reserved))
            .filter(|(f, alias)| f.name != *alias)
            .map(|(f, alias)| (f.mangled_name.clone(), alias))
            .collect();
        Self { renamed }
    }

    /// Name the binding of `f` is declared under.
    pub fn name<'a>(&'a self, f: &'a FunctionNode) -> &'a str {
        self.renamed
            .get(&f.mangled_name)
            .map_or(f.name.as_str(), String::as_str)
    }
}

/// Suffix repeated names until every one is distinct. A suffixed name never
/// takes a name that is declared later in `names` or listed in `reserved`.
fn disambiguate(names: &[&str], reserved: &HashSet<&str>) -> Vec<String> {
    let mut pending: HashSet<&str> = names.iter().copied().collect();
    let mut used: HashSet<String> = HashSet::new();

    names
        .iter()
        .map(|&name| {
            let mut alias = name.to_string();
            let mut n = 1;
            while used.contains(&alias)
                || (n > 1
                    && (pending.contains(alias.as_str()) || reserved.contains(alias.as_str())))
            {
                alias = format!("{}_{}", name, n);
                n += 1;
            }
            pending.remove(name);
            used.insert(alias.clone());
            alias
        })
        .collect()
}
