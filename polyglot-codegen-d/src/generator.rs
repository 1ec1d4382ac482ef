//! D binding generator.

use polyglot_codegen::{
    CodegenError,
    builder::{CodeFragment, Indent, Renderable},
    generation::{
        Emitter, GenerateOptions, ModuleOutput, ProxyFragments, Scope, emit_module,
        method_bindings,
    },
    language::{BindingCodegen, TypeMapper},
    proxy::free_string_symbol,
};
use polyglot_core::sanitize_symbol;
use polyglot_ir::{
    Ast, ClassNode, EnumNode, FunctionNode, Language, QualifiedType, TypeProxy, Value,
    VariableNode,
};

use crate::{
    ast::{Enum, Fn, MangledFn, Param, Struct},
    naming::D_NAMING,
    type_mapper::DTypeMapper,
};

const RAW_STRING_PARAM: &str = "const(char)*";
const RAW_STRING_RETURN: &str = "char*";
const FREE_STRING: &str = "polyglot_free_string";
const EXTERN_CPP: &str = "extern(C++) {";

/// D binding generator.
///
/// Namespaces map to `extern(C++, Name)` scopes, which D resolves like
/// nested modules. Proxy wrappers are forced to D linkage because slices
/// have no C++ mangling.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator {
    types: DTypeMapper,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    fn param(&self, p: &VariableNode) -> Result<Param, CodegenError> {
        let mut param = Param::new(D_NAMING.safe_name(&p.name), self.types.render_type(&p.ty)?);
        if let Some(value) = &p.value {
            param = param.default_value(self.types.literal(value)?);
        }
        Ok(param)
    }

    fn params(&self, f: &FunctionNode) -> Result<Vec<Param>, CodegenError> {
        f.parameters.iter().map(|p| self.param(p)).collect()
    }

    fn return_type(&self, f: &FunctionNode) -> Result<String, CodegenError> {
        if f.return_type.is_void() {
            let ty = if f.flags.noreturn { "noreturn" } else { "void" };
            return Ok(ty.to_string());
        }
        self.types.render_type(&f.return_type)
    }

    fn mangled(&self, name: String, f: &FunctionNode) -> MangledFn {
        let decl = MangledFn::new(name, &f.mangled_name);
        if f.flags.nothrow {
            decl.attr("nothrow")
        } else {
            decl
        }
    }

    fn class_with_methods(
        &self,
        c: &ClassNode,
        mut decl: Struct,
        class_name: &str,
    ) -> Result<Vec<CodeFragment>, CodegenError> {
        let mut raw = Vec::new();
        for binding in method_bindings(c) {
            let method = binding.method;
            let params = self.params(method)?;
            let ret = self.return_type(method)?;

            let mut args: Vec<String> = params.iter().map(|p| p.name.clone()).collect();
            // D overloads natively, so forwarders keep the source name.
            let mut forward = Fn::new(D_NAMING.safe_name(&method.name)).returns(&ret);
            let mut extern_fn = self.mangled(binding.symbol.clone(), method).returns(ret);
            if method.flags.is_static {
                forward = forward.prefix("static");
            } else {
                extern_fn = extern_fn.param(Param::new("self", format!("{}*", class_name)));
                args.insert(0, "&this".to_string());
            }
            for param in params {
                forward = forward.param(param.clone());
                extern_fn = extern_fn.param(param);
            }

            decl = decl.method(
                forward.body_line(format!("return {}({});", binding.symbol, args.join(", "))),
            );
            raw.extend(extern_fn.to_fragments());
        }

        let mut fragments = decl.to_fragments();
        fragments.push(CodeFragment::blank());
        fragments.push(CodeFragment::block(EXTERN_CPP, raw, Some("}".to_string())));
        Ok(fragments)
    }
}

impl BindingCodegen for Generator {
    fn language(&self) -> Language {
        Language::D
    }

    fn file_extension(&self) -> &'static str {
        "d"
    }

    fn type_to_text(&self, ty: &QualifiedType) -> Result<String, CodegenError> {
        self.types.render_type(ty)
    }

    fn value_to_text(&self, value: &Value) -> Result<String, CodegenError> {
        self.types.literal(value)
    }

    fn render(&self, ast: &Ast, opts: &GenerateOptions) -> Result<ModuleOutput, CodegenError> {
        emit_module(self, ast, opts)
    }
}

impl Emitter for Generator {
    fn target(&self) -> Language {
        Language::D
    }

    fn indent(&self) -> Indent {
        Indent::of(Language::D)
    }

    fn prelude(&self, ast: &Ast) -> Vec<CodeFragment> {
        let mut fragments = vec![CodeFragment::line(format!(
            "module {};",
            sanitize_symbol(&ast.module_name)
        ))];
        if ast.has_proxies() {
            let free = MangledFn::new(FREE_STRING, free_string_symbol(&ast.module_name))
                .param(Param::new("s", RAW_STRING_RETURN))
                .attr("nothrow");
            fragments.push(CodeFragment::blank());
            fragments.push(CodeFragment::line("import std.string : fromStringz, toStringz;"));
            fragments.push(CodeFragment::blank());
            fragments.push(CodeFragment::block(
                "extern(C) {",
                free.to_fragments(),
                Some("}".to_string()),
            ));
        }
        fragments
    }

    fn extern_block(&self) -> Option<(&'static str, &'static str)> {
        Some((EXTERN_CPP, "}"))
    }

    fn namespace_open(&self, name: &str) -> Vec<String> {
        vec![format!("extern(C++, {}) {{", D_NAMING.safe_name(name))]
    }

    fn namespace_close(&self, _name: &str) -> String {
        "}".to_string()
    }

    fn function(&self, f: &FunctionNode, _scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        let mut decl = self
            .mangled(D_NAMING.safe_name(&f.name), f)
            .returns(self.return_type(f)?);
        for param in self.params(f)? {
            decl = decl.param(param);
        }
        Ok(decl.to_fragments())
    }

    fn proxy(
        &self,
        f: &FunctionNode,
        proxy: &TypeProxy,
        _scope: &Scope,
    ) -> Result<ProxyFragments, CodegenError> {
        let raw_fn = &proxy.proxy;

        let mut raw = self.mangled(raw_fn.name.clone(), raw_fn);
        for p in &raw_fn.parameters {
            raw = if proxy.is_parameter_proxied(&p.name) {
                raw.param(Param::new(D_NAMING.safe_name(&p.name), RAW_STRING_PARAM))
            } else {
                raw.param(self.param(p)?)
            };
        }
        raw = if proxy.is_return_proxied {
            raw.returns(RAW_STRING_RETURN)
        } else {
            raw.returns(self.return_type(raw_fn)?)
        };

        let mut wrapper = Fn::new(D_NAMING.safe_name(&f.name)).prefix("extern(D)");
        let mut args = Vec::new();
        for p in &f.parameters {
            let name = D_NAMING.safe_name(&p.name);
            if proxy.is_parameter_proxied(&p.name) {
                let mut param = Param::new(&name, "string");
                if let Some(value) = &p.value {
                    param = param.default_value(self.types.literal(value)?);
                }
                wrapper = wrapper.param(param);
                args.push(format!("toStringz({})", name));
            } else {
                wrapper = wrapper.param(self.param(p)?);
                args.push(name);
            }
        }
        let call = format!("{}({})", raw_fn.name, args.join(", "));

        wrapper = if proxy.is_return_proxied {
            wrapper
                .returns("string")
                .body_line(format!("auto raw = {};", call))
                .body_line(format!("scope(exit) {}(raw);", FREE_STRING))
                .body_line("return fromStringz(raw).idup;")
        } else {
            wrapper
                .returns(self.return_type(f)?)
                .body_line(format!("return {};", call))
        };

        Ok(ProxyFragments {
            raw: raw.to_fragments(),
            wrapper: wrapper.to_fragments(),
        })
    }

    fn enumeration(&self, e: &EnumNode, _scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        let name = D_NAMING.safe_name(&e.name);
        let tag = self
            .types
            .render_enum_tag(e.tag_type.as_ref())?
            .unwrap_or("int");

        if e.enumerators.is_empty() {
            return Ok(vec![CodeFragment::line(format!("alias {} = {};", name, tag))]);
        }

        let mut decl = Enum::new(name).base(tag);
        for enumerator in &e.enumerators {
            let value = enumerator
                .value
                .as_ref()
                .map(|v| self.types.literal(v))
                .transpose()?;
            decl = decl.member(D_NAMING.safe_name(&enumerator.name), value);
        }
        Ok(decl.to_fragments())
    }

    fn class(&self, c: &ClassNode, _scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        let name = D_NAMING.safe_name(&c.name);
        let mut decl = Struct::new(&name);
        for member in &c.members {
            decl = decl.field(
                self.types.render_field(&member.ty)?,
                D_NAMING.safe_name(&member.name),
            );
        }

        if c.methods.is_empty() {
            return Ok(decl.to_fragments());
        }
        self.class_with_methods(c, decl, &name)
    }

    fn variable(
        &self,
        v: &VariableNode,
        _scope: &Scope,
    ) -> Result<Vec<CodeFragment>, CodegenError> {
        let value = v.value.as_ref().ok_or_else(|| CodegenError::MissingValue {
            name: v.name.clone(),
            target: Language::D,
        })?;
        let ty = if v.ty.is_owned_string() {
            "string".to_string()
        } else if v.ty.is_indirect() {
            return Err(self.types.unsupported_type(&v.ty));
        } else {
            self.types.render_type(&v.ty)?
        };
        Ok(vec![CodeFragment::line(format!(
            "enum {} {} = {};",
            ty,
            D_NAMING.safe_name(&v.name),
            self.types.literal(value)?
        ))])
    }
}

#[cfg(test)]
mod tests {
    use polyglot_codegen::{
        generation::Timestamp,
        proxy::{OwnedStringPolicy, synthesize},
    };
    use polyglot_ir::{BaseType, ClassKind, Literal, NodeKind};
    use pretty_assertions::assert_eq;

    use super::*;

    const ROOT: [&str; 0] = [];

    fn render(ast: &Ast) -> ModuleOutput {
        let opts = GenerateOptions::default().with_timestamp(Timestamp::Fixed("T".into()));
        Generator::new().render(ast, &opts).unwrap()
    }

    /// Everything after the `module` line.
    fn text(output: &ModuleOutput) -> &str {
        output
            .content
            .split_once(";\n\n")
            .map(|(_, rest)| rest)
            .unwrap_or_default()
    }

    #[test]
    fn test_module_line_is_sanitized() {
        let ast = Ast::new("my-lib", Language::Cpp);
        assert!(render(&ast).content.ends_with("\nmodule my_lib;\n\n"));
    }

    #[test]
    fn test_defaults_and_nothrow() {
        let mut f = FunctionNode::new("clamp", "_Z5clampii", QualifiedType::new(BaseType::Int32))
            .param(VariableNode::new("x", QualifiedType::new(BaseType::Int32)))
            .param(
                VariableNode::new("hi", QualifiedType::new(BaseType::Int32))
                    .with_value(Value::new(BaseType::Int32, Literal::Int(10)).unwrap()),
            );
        f.flags.nothrow = true;
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(&ROOT, f.into());

        assert_eq!(
            text(&render(&ast)),
            "extern(C++) {\n    pragma(mangle, \"_Z5clampii\") int clamp(int x, int hi = 10) nothrow;\n}\n"
        );
    }

    #[test]
    fn test_wide_integer_is_skipped() {
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(
            &ROOT,
            FunctionNode::new("wide", "_Z4widev", QualifiedType::new(BaseType::Uint128)).into(),
        );
        let output = render(&ast);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].kind, NodeKind::Function);
        assert_eq!(
            output.skipped[0].reason,
            "type 'uint128' is not supported by D"
        );
        assert!(!output.content.contains("extern(C++)"));
    }

    #[test]
    fn test_empty_enum_is_alias() {
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(&ROOT, EnumNode::new("Flags").into());
        assert_eq!(text(&render(&ast)), "alias Flags = int;\n");
    }

    #[test]
    fn test_static_method() {
        let mut make = FunctionNode::new(
            "make",
            "_ZN7Counter4makeEv",
            QualifiedType::class_ref("Counter"),
        );
        make.flags.is_static = true;
        let c = ClassNode::new("Counter", ClassKind::Struct).method(make);
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(&ROOT, c.into());

        assert_eq!(
            text(&render(&ast)),
            "extern(C++) struct Counter {\n    static Counter make() {\n        return polyglot_Counter_method_make();\n    }\n}\n\nextern(C++) {\n    pragma(mangle, \"_ZN7Counter4makeEv\") Counter polyglot_Counter_method_make();\n}\n"
        );
    }

    #[test]
    fn test_variables() {
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(
            &ROOT,
            VariableNode::new("VERSION", QualifiedType::string())
                .with_value(Value::string("1.0"))
                .into(),
        );
        ast.insert(
            &ROOT,
            VariableNode::new("MAX", QualifiedType::new(BaseType::Uint64))
                .with_value(Value::new(BaseType::Uint64, Literal::Uint(u64::MAX)).unwrap())
                .into(),
        );
        assert_eq!(
            text(&render(&ast)),
            "enum string VERSION = \"1.0\";\n\nenum ulong MAX = 18446744073709551615UL;\n"
        );
    }

    #[test]
    fn test_string_default_survives_proxying() {
        let mut log = FunctionNode::new("log", "_Z3logSs", QualifiedType::void()).param(
            VariableNode::new("msg", QualifiedType::string()).with_value(Value::string("hello")),
        );
        log.type_proxy = synthesize(&log, &OwnedStringPolicy);
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(&ROOT, log.into());

        let content = render(&ast).content;
        assert!(content.contains(
            "pragma(mangle, \"polyglot_proxy__Z3logSs\") void polyglot_proxy__Z3logSs(const(char)* msg);\n"
        ));
        assert!(content.contains("extern(D) void log(string msg = \"hello\") {\n"));
        assert!(content.contains("    return polyglot_proxy__Z3logSs(toStringz(msg));\n"));
    }
}
