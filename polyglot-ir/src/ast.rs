//! Declaration nodes and the per-module tree.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{Language, QualifiedType, Value};

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Function,
    Class,
    Enum,
    Variable,
    Namespace,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Function => "function",
            NodeKind::Class => "class",
            NodeKind::Enum => "enum",
            NodeKind::Variable => "variable",
            NodeKind::Namespace => "namespace",
        }
    }
}

/// A declaration in a module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Function(FunctionNode),
    Class(ClassNode),
    Enum(EnumNode),
    Variable(VariableNode),
    Namespace(NamespaceNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Function(_) => NodeKind::Function,
            Node::Class(_) => NodeKind::Class,
            Node::Enum(_) => NodeKind::Enum,
            Node::Variable(_) => NodeKind::Variable,
            Node::Namespace(_) => NodeKind::Namespace,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Function(f) => &f.name,
            Node::Class(c) => &c.name,
            Node::Enum(e) => &e.name,
            Node::Variable(v) => &v.name,
            Node::Namespace(ns) => &ns.name,
        }
    }
}

impl From<FunctionNode> for Node {
    fn from(node: FunctionNode) -> Self {
        Node::Function(node)
    }
}

impl From<ClassNode> for Node {
    fn from(node: ClassNode) -> Self {
        Node::Class(node)
    }
}

impl From<EnumNode> for Node {
    fn from(node: EnumNode) -> Self {
        Node::Enum(node)
    }
}

impl From<VariableNode> for Node {
    fn from(node: VariableNode) -> Self {
        Node::Variable(node)
    }
}

impl From<NamespaceNode> for Node {
    fn from(node: NamespaceNode) -> Self {
        Node::Namespace(node)
    }
}

/// A typed name with an optional constant value.
///
/// Used for globals, function parameters and class members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableNode {
    pub name: String,
    pub ty: QualifiedType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl VariableNode {
    pub fn new(name: impl Into<String>, ty: QualifiedType) -> Self {
        Self {
            name: name.into(),
            ty,
            value: None,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Modifiers recorded on a function declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FunctionFlags {
    pub noreturn: bool,
    pub nothrow: bool,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_final: bool,
}

/// A function, method, constructor or destructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionNode {
    pub name: String,
    /// Linkage name resolved by the extraction front-end. Opaque.
    pub mangled_name: String,
    pub return_type: QualifiedType,
    pub parameters: Vec<VariableNode>,
    pub flags: FunctionFlags,
    /// Marshaling descriptor, present once a proxy has been synthesized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_proxy: Option<TypeProxy>,
}

impl FunctionNode {
    pub fn new(
        name: impl Into<String>,
        mangled_name: impl Into<String>,
        return_type: QualifiedType,
    ) -> Self {
        Self {
            name: name.into(),
            mangled_name: mangled_name.into(),
            return_type,
            parameters: Vec::new(),
            flags: FunctionFlags::default(),
            type_proxy: None,
        }
    }

    pub fn param(mut self, param: VariableNode) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_flags(mut self, flags: FunctionFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_proxied(&self) -> bool {
        self.type_proxy.is_some()
    }
}

/// Records that a function is called through a synthesized proxy.
///
/// The original function exclusively owns its proxy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeProxy {
    pub is_return_proxied: bool,
    /// Names of proxied parameters, in parameter order.
    pub proxied_parameters: Vec<String>,
    pub proxy: Box<FunctionNode>,
}

impl TypeProxy {
    pub fn is_parameter_proxied(&self, name: &str) -> bool {
        self.proxied_parameters.iter().any(|p| p == name)
    }
}

/// One enumerator of an [`EnumNode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enumerator {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Enumerator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumNode {
    pub name: String,
    /// Explicit underlying type; generators fall back to their default
    /// integer width when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_type: Option<QualifiedType>,
    pub enumerators: Vec<Enumerator>,
}

impl EnumNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag_type: None,
            enumerators: Vec::new(),
        }
    }

    pub fn tag(mut self, ty: QualifiedType) -> Self {
        self.tag_type = Some(ty);
        self
    }

    pub fn enumerator(mut self, enumerator: Enumerator) -> Self {
        self.enumerators.push(enumerator);
        self
    }

    /// Effective discriminant of every enumerator, in declaration order.
    ///
    /// An enumerator without an explicit value takes the previous value plus
    /// one, or zero when it is first.
    pub fn resolved_values(&self) -> Vec<(&str, i128)> {
        let mut next = 0i128;
        self.enumerators
            .iter()
            .map(|e| {
                let value = e
                    .value
                    .as_ref()
                    .and_then(|v| v.literal().as_integer())
                    .unwrap_or(next);
                next = value + 1;
                (e.name.as_str(), value)
            })
            .collect()
    }

    /// Enumerators that repeat an earlier value, each paired with the first
    /// enumerator holding that value.
    pub fn aliases(&self) -> Vec<(&str, &str)> {
        let mut first: IndexMap<i128, &str> = IndexMap::new();
        let mut aliases = Vec::new();
        for (name, value) in self.resolved_values() {
            match first.get(&value) {
                Some(&canonical) => aliases.push((name, canonical)),
                None => {
                    first.insert(value, name);
                }
            }
        }
        aliases
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Struct,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassNode {
    pub name: String,
    pub kind: ClassKind,
    pub constructors: Vec<FunctionNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destructor: Option<FunctionNode>,
    pub members: Vec<VariableNode>,
    pub methods: Vec<FunctionNode>,
}

impl ClassNode {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            constructors: Vec::new(),
            destructor: None,
            members: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn member(mut self, member: VariableNode) -> Self {
        self.members.push(member);
        self
    }

    pub fn method(mut self, method: FunctionNode) -> Self {
        self.methods.push(method);
        self
    }
}

/// A named namespace owning its own nested tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceNode {
    pub name: String,
    pub ast: Ast,
}

/// Declarations of one module, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ast {
    pub module_name: String,
    pub language: Language,
    pub nodes: Vec<Node>,
}

impl Ast {
    pub fn new(module_name: impl Into<String>, language: Language) -> Self {
        Self {
            module_name: module_name.into(),
            language,
            nodes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node at the end of a namespace path.
    ///
    /// Consecutive declarations in the same namespace share one
    /// [`NamespaceNode`]: at every level the path descends into the last
    /// node when it is a namespace of the same name, and only otherwise
    /// opens a new one.
    pub fn insert<S: AsRef<str>>(&mut self, namespace: &[S], node: Node) {
        let Some((head, rest)) = namespace.split_first() else {
            self.nodes.push(node);
            return;
        };
        let head = head.as_ref();

        let folds = matches!(self.nodes.last(), Some(Node::Namespace(ns)) if ns.name == head);
        if !folds {
            self.nodes.push(Node::Namespace(NamespaceNode {
                name: head.to_string(),
                ast: Ast::new(self.module_name.clone(), self.language),
            }));
        }

        if let Some(Node::Namespace(ns)) = self.nodes.last_mut() {
            ns.ast.insert(rest, node);
        }
    }

    /// Number of declarations, not counting namespaces themselves.
    pub fn declaration_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match node {
                Node::Namespace(ns) => ns.ast.declaration_count(),
                _ => 1,
            })
            .sum()
    }

    /// Visit every free function, descending into namespaces.
    pub fn for_each_function_mut(&mut self, f: &mut impl FnMut(&mut FunctionNode)) {
        for node in &mut self.nodes {
            match node {
                Node::Function(function) => f(function),
                Node::Namespace(ns) => ns.ast.for_each_function_mut(f),
                _ => {}
            }
        }
    }

    /// True when any function in the tree carries a proxy.
    pub fn has_proxies(&self) -> bool {
        self.nodes.iter().any(|node| match node {
            Node::Function(f) => f.is_proxied(),
            Node::Namespace(ns) => ns.ast.has_proxies(),
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::BaseType;

    fn function(name: &str) -> Node {
        FunctionNode::new(name, format!("_Z{}{}v", name.len(), name), QualifiedType::void()).into()
    }

    fn namespace<'a>(ast: &'a Ast, name: &str) -> Vec<&'a NamespaceNode> {
        ast.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Namespace(ns) if ns.name == name => Some(ns),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_node_kind_matches_variant() {
        assert_eq!(function("f").kind(), NodeKind::Function);
        assert_eq!(Node::from(EnumNode::new("E")).kind(), NodeKind::Enum);
        assert_eq!(
            Node::from(ClassNode::new("C", ClassKind::Struct)).kind(),
            NodeKind::Class
        );
        assert_eq!(
            Node::from(VariableNode::new("v", QualifiedType::new(BaseType::Int32))).kind(),
            NodeKind::Variable
        );
    }

    #[test]
    fn test_namespace_folding() {
        let mut ast = Ast::new("example", Language::Cpp);
        ast.insert(&["Foo", "Bar"], function("first"));
        ast.insert(&["Foo", "Bar"], function("second"));

        let foo = namespace(&ast, "Foo");
        assert_eq!(foo.len(), 1);
        let bar = namespace(&foo[0].ast, "Bar");
        assert_eq!(bar.len(), 1);
        let names: Vec<_> = bar[0].ast.nodes.iter().map(Node::name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_namespace_reopened_after_other_declaration() {
        let mut ast = Ast::new("example", Language::Cpp);
        ast.insert(&["Foo"], function("a"));
        ast.insert::<&str>(&[], function("b"));
        ast.insert(&["Foo"], function("c"));

        let kinds: Vec<_> = ast.nodes.iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Namespace, NodeKind::Function, NodeKind::Namespace]
        );
        assert_eq!(ast.declaration_count(), 3);
    }

    #[test]
    fn test_nested_namespace_inherits_module() {
        let mut ast = Ast::new("example", Language::Cpp);
        ast.insert(&["Foo"], function("a"));
        let Node::Namespace(ns) = &ast.nodes[0] else {
            panic!("expected namespace");
        };
        assert_eq!(ns.ast.module_name, "example");
        assert_eq!(ns.ast.language, Language::Cpp);
    }

    #[test]
    fn test_enumerator_sequencing() {
        let e = EnumNode::new("Level")
            .enumerator(Enumerator::new("A"))
            .enumerator(Enumerator::new("B").with_value(Value::int(100)))
            .enumerator(Enumerator::new("C"));
        assert_eq!(e.resolved_values(), vec![("A", 0), ("B", 100), ("C", 101)]);
    }

    #[test]
    fn test_enumerator_aliases() {
        let e = EnumNode::new("Mode")
            .enumerator(Enumerator::new("A").with_value(Value::int(1)))
            .enumerator(Enumerator::new("B").with_value(Value::int(5)))
            .enumerator(Enumerator::new("Alias").with_value(Value::int(1)))
            .enumerator(Enumerator::new("Next").with_value(Value::int(0)))
            .enumerator(Enumerator::new("Same"));
        assert_eq!(e.aliases(), vec![("Alias", "A"), ("Same", "A")]);
        assert!(EnumNode::new("Empty").aliases().is_empty());
    }

    #[test]
    fn test_for_each_function_descends_into_namespaces() {
        let mut ast = Ast::new("example", Language::Cpp);
        ast.insert::<&str>(&[], function("a"));
        ast.insert(&["Foo", "Bar"], function("b"));

        let mut seen = Vec::new();
        ast.for_each_function_mut(&mut |f| seen.push(f.name.clone()));
        assert_eq!(seen, vec!["a", "b"]);
        assert!(!ast.has_proxies());
    }
}
