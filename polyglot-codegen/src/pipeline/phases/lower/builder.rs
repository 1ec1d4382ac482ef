//! Builds module trees from manifest declarations.

use polyglot_ir::{
    ClassKind, ClassNode, EnumNode, Enumerator, FunctionFlags, FunctionNode, Language,
    ModuleRegistry, QualifiedType, VariableNode,
};
use polyglot_manifest::{
    ClassDecl, Declaration, EnumDecl, FunctionDecl, FunctionFlag, MethodDecl, TypeSpec, VarDecl,
    VariableDecl,
};
use tracing::trace;

use super::{
    types::resolve_type,
    values::{ValueError, enumerator_kind, lower_value},
};
use crate::{ConstructionError, pipeline::Diagnostic};

/// Where a declaration came from, for diagnostics.
struct Site {
    declaration: String,
    location: String,
}

impl Site {
    fn new(file: &str, line: Option<u32>, namespace: &[String], name: &str) -> Self {
        let mut parts: Vec<&str> = namespace.iter().map(String::as_str).collect();
        parts.push(name);
        Self {
            declaration: parts.join("::"),
            location: match line {
                Some(line) => format!("{}:{}", file, line),
                None => file.to_string(),
            },
        }
    }

    fn member(&self, name: &str) -> Self {
        Self {
            declaration: format!("{}::{}", self.declaration, name),
            location: self.location.clone(),
        }
    }
}

/// Incrementally builds the [`ModuleRegistry`] for one source language.
///
/// Each [`add`](Self::add) call either inserts one complete node or fails
/// without touching the registry or the collected warnings.
pub struct AstBuilder {
    registry: ModuleRegistry,
    warnings: Vec<Diagnostic>,
    /// Warnings for the declaration being lowered.
    pending: Vec<Diagnostic>,
}

impl AstBuilder {
    pub fn new(language: Language) -> Self {
        Self {
            registry: ModuleRegistry::new(language),
            warnings: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Add any declaration.
    pub fn add(&mut self, decl: &Declaration) -> Result<(), ConstructionError> {
        let result = match decl {
            Declaration::Function(f) => self.add_function(f),
            Declaration::Enum(e) => self.add_enum(e),
            Declaration::Class(c) => self.add_class(c),
            Declaration::Variable(v) => self.add_variable(v),
        };
        let pending = std::mem::take(&mut self.pending);
        if result.is_ok() {
            self.warnings.extend(pending);
        }
        result
    }

    fn add_function(&mut self, decl: &FunctionDecl) -> Result<(), ConstructionError> {
        let site = Site::new(&decl.file, decl.line, &decl.namespace, &decl.name);
        let node = self.function(
            &decl.name,
            &decl.mangled,
            &decl.returns,
            &decl.params,
            &decl.flags,
            &site,
        )?;
        self.insert(&decl.file, &decl.namespace, node.into(), &site);
        Ok(())
    }

    fn add_enum(&mut self, decl: &EnumDecl) -> Result<(), ConstructionError> {
        let site = Site::new(&decl.file, decl.line, &decl.namespace, &decl.name);
        let mut node = EnumNode::new(&decl.name);
        if let Some(tag) = &decl.tag {
            node = node.tag(self.resolve(tag, &site)?);
        }

        let kind = enumerator_kind(node.tag_type.as_ref());
        for e in &decl.enumerators {
            let mut enumerator = Enumerator::new(&e.name);
            if let Some(spec) = &e.value {
                let value = lower_value(spec, kind).map_err(|err| match err {
                    ValueError::NotConstant(expr) => ConstructionError::UnevaluableConstant {
                        declaration: site.declaration.clone(),
                        enumerator: e.name.clone(),
                        expr,
                    },
                    ValueError::Unencodable(source) => ConstructionError::UnsupportedDefault {
                        declaration: site.declaration.clone(),
                        parameter: e.name.clone(),
                        source,
                    },
                })?;
                enumerator = enumerator.with_value(value);
            }
            node = node.enumerator(enumerator);
        }

        self.insert(&decl.file, &decl.namespace, node.into(), &site);
        Ok(())
    }

    fn add_class(&mut self, decl: &ClassDecl) -> Result<(), ConstructionError> {
        let site = Site::new(&decl.file, decl.line, &decl.namespace, &decl.name);
        let kind = if decl.is_struct {
            ClassKind::Struct
        } else {
            ClassKind::Class
        };
        let mut node = ClassNode::new(&decl.name, kind);

        for member in &decl.members {
            node.members.push(self.variable(member, &site)?);
        }
        for ctor in &decl.constructors {
            node.constructors.push(self.method(ctor, &site)?);
        }
        if let Some(dtor) = &decl.destructor {
            node.destructor = Some(self.method(dtor, &site)?);
        }
        for method in &decl.methods {
            node.methods.push(self.method(method, &site)?);
        }

        self.insert(&decl.file, &decl.namespace, node.into(), &site);
        Ok(())
    }

    fn add_variable(&mut self, decl: &VariableDecl) -> Result<(), ConstructionError> {
        let site = Site::new(&decl.file, decl.line, &decl.namespace, &decl.name);
        let ty = self.resolve(&decl.ty, &site)?;
        let mut node = VariableNode::new(&decl.name, ty);
        if let Some(spec) = &decl.value {
            node.value = Some(default_value(spec, &node.ty, &decl.name, &site)?);
        }

        self.insert(&decl.file, &decl.namespace, node.into(), &site);
        Ok(())
    }

    /// Drain the advisory warnings collected so far.
    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.warnings)
    }

    pub fn finish(self) -> ModuleRegistry {
        self.registry
    }

    fn insert(
        &mut self,
        file: &str,
        namespace: &[String],
        node: polyglot_ir::Node,
        site: &Site,
    ) {
        trace!(declaration = %site.declaration, kind = node.kind().as_str(), "lowered");
        self.registry.insert(file, namespace, node);
    }

    fn method(&mut self, decl: &MethodDecl, class: &Site) -> Result<FunctionNode, ConstructionError> {
        let site = class.member(&decl.name);
        self.function(
            &decl.name,
            &decl.mangled,
            &decl.returns,
            &decl.params,
            &decl.flags,
            &site,
        )
    }

    fn function(
        &mut self,
        name: &str,
        mangled: &str,
        returns: &TypeSpec,
        params: &[VarDecl],
        flags: &[FunctionFlag],
        site: &Site,
    ) -> Result<FunctionNode, ConstructionError> {
        let return_type = self.resolve(returns, site)?;
        let mut node = FunctionNode::new(name, mangled, return_type).with_flags(lower_flags(flags));
        for param in params {
            node.parameters.push(self.variable(param, site)?);
        }
        Ok(node)
    }

    fn variable(&mut self, decl: &VarDecl, site: &Site) -> Result<VariableNode, ConstructionError> {
        let ty = self.resolve(&decl.ty, site)?;
        let mut node = VariableNode::new(&decl.name, ty);
        if let Some(spec) = &decl.default {
            node.value = Some(default_value(spec, &node.ty, &decl.name, site)?);
        }
        Ok(node)
    }

    fn resolve(&mut self, spec: &TypeSpec, site: &Site) -> Result<QualifiedType, ConstructionError> {
        let resolved = resolve_type(spec, &site.declaration)?;
        if resolved.is_platform_dependent {
            self.pending.push(
                Diagnostic::warning(
                    "lower",
                    format!(
                        "'{}' in '{}' resolved to {}; use fixed-width integer types for portability",
                        spec.base(),
                        site.declaration,
                        resolved.ty.base
                    ),
                )
                .at(&site.location)
                .for_declaration(&site.declaration),
            );
        }
        Ok(resolved.ty)
    }
}

fn default_value(
    spec: &polyglot_manifest::ValueSpec,
    ty: &QualifiedType,
    name: &str,
    site: &Site,
) -> Result<polyglot_ir::Value, ConstructionError> {
    lower_value(spec, ty.base).map_err(|err| match err {
        ValueError::NotConstant(expr) => ConstructionError::NonConstantDefault {
            declaration: site.declaration.clone(),
            parameter: name.to_string(),
            expr,
        },
        ValueError::Unencodable(source) => ConstructionError::UnsupportedDefault {
            declaration: site.declaration.clone(),
            parameter: name.to_string(),
            source,
        },
    })
}

fn lower_flags(flags: &[FunctionFlag]) -> FunctionFlags {
    let mut out = FunctionFlags::default();
    for flag in flags {
        match flag {
            FunctionFlag::Noreturn => out.noreturn = true,
            FunctionFlag::Nothrow => out.nothrow = true,
            FunctionFlag::Static => out.is_static = true,
            FunctionFlag::Virtual => out.is_virtual = true,
            FunctionFlag::Override => out.is_override = true,
            FunctionFlag::Final => out.is_final = true,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use polyglot_ir::{BaseType, IrError, Literal, Node, Value};
    use polyglot_manifest::Manifest;
    use pretty_assertions::assert_eq;

    use super::*;

    fn build(src: &str) -> (AstBuilder, Vec<Result<(), ConstructionError>>) {
        let manifest: Manifest = src.parse().unwrap();
        let mut builder = AstBuilder::new(manifest.source.language);
        let results = manifest
            .declarations
            .iter()
            .map(|decl| builder.add(decl))
            .collect();
        (builder, results)
    }

    #[test]
    fn test_function_with_namespace() {
        let (builder, results) = build(
            r#"
            [[decl]]
            kind = "function"
            file = "src/example.cpp"
            namespace = ["Foo"]
            name = "greet"
            mangled = "_ZN3Foo5greetENSt7__cxx1112basic_stringIcSt11char_traitsIcESaIcEEEi"
            returns = "std::string"
            params = [
                { name = "who", type = { base = "std::string", const = true, reference = true } },
                { name = "times", type = "int32_t", default = 1 },
            ]
            flags = ["nothrow"]
            "#,
        );
        assert!(results.iter().all(Result::is_ok));

        let registry = builder.finish();
        let ast = registry.get("example").unwrap();
        let Node::Namespace(ns) = &ast.nodes[0] else {
            panic!("expected namespace");
        };
        assert_eq!(ns.name, "Foo");
        let Node::Function(f) = &ns.ast.nodes[0] else {
            panic!("expected function");
        };
        assert_eq!(f.return_type, QualifiedType::string());
        assert_eq!(
            f.parameters[0].ty,
            QualifiedType::string().constant().reference()
        );
        assert_eq!(
            f.parameters[1].value,
            Some(Value::new(BaseType::Int32, Literal::Int(1)).unwrap())
        );
        assert!(f.flags.nothrow);
        assert!(f.type_proxy.is_none());
    }

    #[test]
    fn test_platform_dependent_type_warns() {
        let (mut builder, results) = build(
            r#"
            [[decl]]
            kind = "function"
            file = "math.cpp"
            line = 4
            name = "add"
            mangled = "_Z3addii"
            returns = "int"
            params = [{ name = "a", type = "int32_t" }]
            "#,
        );
        assert!(results[0].is_ok());

        let warnings = builder.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "'int' in 'add' resolved to int32; use fixed-width integer types for portability"
        );
        assert_eq!(warnings[0].location.as_deref(), Some("math.cpp:4"));
        assert!(builder.take_warnings().is_empty());
    }

    #[test]
    fn test_rejected_declaration_drops_its_warnings() {
        let (mut builder, results) = build(
            r#"
            [[decl]]
            kind = "function"
            file = "m.cpp"
            name = "roll"
            mangled = "_Z4rollii"
            params = [
                { name = "count", type = "int" },
                { name = "sides", type = "int32", default = { expr = "rand()" } },
            ]
            "#,
        );
        assert!(results[0].is_err());
        assert!(builder.take_warnings().is_empty());
    }

    #[test]
    fn test_non_constant_default_skips_declaration() {
        let (builder, results) = build(
            r#"
            [[decl]]
            kind = "function"
            file = "m.cpp"
            name = "roll"
            mangled = "_Z4rolli"
            params = [{ name = "sides", type = "int32", default = { expr = "rand()" } }]

            [[decl]]
            kind = "function"
            file = "m.cpp"
            name = "keep"
            mangled = "_Z4keepv"
            "#,
        );
        assert_eq!(
            results[0],
            Err(ConstructionError::NonConstantDefault {
                declaration: "roll".into(),
                parameter: "sides".into(),
                expr: "rand()".into(),
            })
        );
        assert!(results[1].is_ok());

        let registry = builder.finish();
        let ast = registry.get("m").unwrap();
        assert_eq!(ast.nodes.len(), 1);
        assert_eq!(ast.nodes[0].name(), "keep");
    }

    #[test]
    fn test_unsupported_default() {
        let (_, results) = build(
            r#"
            [[decl]]
            kind = "function"
            file = "m.cpp"
            name = "scale"
            mangled = "_Z5scalej"
            params = [{ name = "by", type = "uint32_t", default = -2 }]
            "#,
        );
        assert_eq!(
            results[0],
            Err(ConstructionError::UnsupportedDefault {
                declaration: "scale".into(),
                parameter: "by".into(),
                source: IrError::LiteralOutOfRange {
                    ty: BaseType::Uint32,
                    value: "-2".into(),
                },
            })
        );
    }

    #[test]
    fn test_enum_values_use_tag_width() {
        let (builder, results) = build(
            r#"
            [[decl]]
            kind = "enum"
            file = "shapes.cpp"
            name = "Kind"
            tag = "uint8_t"
            enumerators = [{ name = "Circle" }, { name = "Square", value = 4 }, { name = "Line" }]

            [[decl]]
            kind = "enum"
            file = "shapes.cpp"
            name = "Bad"
            enumerators = [{ name = "X", value = { expr = "sizeof(T)" } }]
            "#,
        );
        assert!(results[0].is_ok());
        assert_eq!(
            results[1],
            Err(ConstructionError::UnevaluableConstant {
                declaration: "Bad".into(),
                enumerator: "X".into(),
                expr: "sizeof(T)".into(),
            })
        );

        let registry = builder.finish();
        let Node::Enum(e) = &registry.get("shapes").unwrap().nodes[0] else {
            panic!("expected enum");
        };
        assert_eq!(e.tag_type, Some(QualifiedType::new(BaseType::Uint8)));
        assert_eq!(
            e.enumerators[1].value.as_ref().map(Value::ty),
            Some(BaseType::Uint8)
        );
        assert_eq!(
            e.resolved_values(),
            vec![("Circle", 0), ("Square", 4), ("Line", 5)]
        );
    }

    #[test]
    fn test_class_members_and_methods() {
        let (builder, results) = build(
            r#"
            [[decl]]
            kind = "class"
            file = "widget.cpp"
            name = "Widget"
            struct = true
            members = [{ name = "width", type = "int32_t" }, { name = "height", type = "int32_t" }]
            constructors = [{ name = "Widget", mangled = "_ZN6WidgetC1Ev" }]
            destructor = { name = "~Widget", mangled = "_ZN6WidgetD1Ev" }
            methods = [{ name = "area", mangled = "_ZNK6Widget4areaEv", returns = "int32_t" }]
            "#,
        );
        assert!(results[0].is_ok());

        let registry = builder.finish();
        let Node::Class(c) = &registry.get("widget").unwrap().nodes[0] else {
            panic!("expected class");
        };
        assert_eq!(c.kind, ClassKind::Struct);
        assert_eq!(c.members.len(), 2);
        assert_eq!(c.constructors[0].mangled_name, "_ZN6WidgetC1Ev");
        assert!(c.destructor.is_some());
        assert_eq!(c.methods[0].return_type, QualifiedType::new(BaseType::Int32));
    }

    #[test]
    fn test_method_errors_name_the_method() {
        let (_, results) = build(
            r#"
            [[decl]]
            kind = "class"
            file = "widget.cpp"
            name = "Widget"
            methods = [{ name = "resize", mangled = "_ZN6Widget6resizeE", params = [{ name = "n", type = "size_type" }] }]
            "#,
        );
        assert_eq!(
            results[0],
            Err(ConstructionError::UnknownType {
                declaration: "Widget::resize".into(),
                spelling: "size_type".into(),
            })
        );
    }

    #[test]
    fn test_variable_constant() {
        let (builder, results) = build(
            r#"
            [[decl]]
            kind = "variable"
            file = "config.cpp"
            namespace = ["cfg"]
            name = "MAX_SIZE"
            type = { base = "uint64_t", const = true }
            value = 4096
            "#,
        );
        assert!(results[0].is_ok());

        let registry = builder.finish();
        let Node::Namespace(ns) = &registry.get("config").unwrap().nodes[0] else {
            panic!("expected namespace");
        };
        let Node::Variable(v) = &ns.ast.nodes[0] else {
            panic!("expected variable");
        };
        assert!(v.ty.is_const);
        assert_eq!(v.value.as_ref().map(|v| v.literal()), Some(&Literal::Uint(4096)));
    }
}
