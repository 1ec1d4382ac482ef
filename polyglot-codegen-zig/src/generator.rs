//! Zig binding generator.

use polyglot_codegen::{
    CodegenError,
    builder::{CodeFragment, Indent, Renderable},
    generation::{
        Emitter, GenerateOptions, ModuleOutput, ProxyFragments, Scope, emit_module,
        method_bindings,
    },
    language::{BindingCodegen, LocalNames, TypeMapper},
    proxy::free_string_symbol,
};
use polyglot_ir::{
    Ast, ClassNode, EnumNode, FunctionNode, Language, Literal, QualifiedType, TypeProxy, Value,
    VariableNode,
};

use crate::{
    ast::{Const, Container, ExternFn, Fn, Param},
    naming::ZIG_NAMING,
    type_mapper::{ZigTypeMapper, string_literal},
};

const RAW_STRING_PARAM: &str = "[*c]const u8";
const RAW_STRING_RETURN: &str = "[*c]u8";
/// Container-level alias of the function releasing proxied return strings.
const FREE_STRING: &str = "polyglot_free_string";

/// Zig binding generator.
///
/// Each function is an `extern fn` named by its mangled symbol plus a
/// `pub const` alias with the source name. Namespaces become nested
/// `struct` containers, which resolve names lexically, so every nesting
/// level can reach the module's free function directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator {
    types: ZigTypeMapper,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    fn param(&self, p: &VariableNode) -> Result<Param, CodegenError> {
        Ok(Param::new(
            ZIG_NAMING.safe_name(&p.name),
            self.types.render_type(&p.ty)?,
        ))
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

    fn method_fragments(
        &self,
        c: &ClassNode,
        class_name: &str,
    ) -> Result<(Vec<CodeFragment>, Vec<CodeFragment>), CodegenError> {
        let mut methods = Vec::new();
        let mut raw = Vec::new();

        for binding in method_bindings(c) {
            let method = binding.method;
            let params = self.params(method)?;
            let ret = self.return_type(method)?;

            let mut args: Vec<String> = params.iter().map(|p| p.name.clone()).collect();
            let mut forward = Fn::new(ZIG_NAMING.safe_name(&binding.alias));
            let mut extern_fn = ExternFn::new(&method.mangled_name);
            if !method.flags.is_static {
                forward = forward.param(Param::new("self", format!("*{}", class_name)));
                extern_fn = extern_fn.param(Param::new("this", format!("*{}", class_name)));
                args.insert(0, "self".to_string());
            }
            for param in params {
                forward = forward.param(param.clone());
                extern_fn = extern_fn.param(param);
            }

            if !methods.is_empty() {
                methods.push(CodeFragment::blank());
            }
            methods.extend(
                forward
                    .returns(&ret)
                    .body_line(format!("return {}({});", binding.symbol, args.join(", ")))
                    .to_fragments(),
            );

            let extern_fn = extern_fn.returns(ret);
            raw.extend(extern_fn.to_fragments());
            raw.extend(
                Const::new(&binding.symbol, extern_fn.ident())
                    .private()
                    .to_fragments(),
            );
        }

        Ok((methods, raw))
    }

    fn constant(
        &self,
        name: &str,
        ty: &QualifiedType,
        value: &Value,
    ) -> Result<Const, CodegenError> {
        let name = ZIG_NAMING.safe_name(name);
        if let (true, Literal::String(s)) = (ty.is_owned_string(), value.literal()) {
            return Ok(Const::new(name, string_literal(s)).ty("[]const u8"));
        }
        if ty.is_indirect() {
            return Err(self.types.unsupported_type(ty));
        }
        Ok(Const::new(name, self.types.literal(value)?).ty(self.types.render_type(ty)?))
    }
}

impl BindingCodegen for Generator {
    fn language(&self) -> Language {
        Language::Zig
    }

    fn file_extension(&self) -> &'static str {
        "zig"
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
        Language::Zig
    }

    fn indent(&self) -> Indent {
        Indent::of(Language::Zig)
    }

    fn prelude(&self, ast: &Ast) -> Vec<CodeFragment> {
        let mut fragments = vec![CodeFragment::line("const std = @import(\"std\");")];
        if ast.has_proxies() {
            let free = ExternFn::new(free_string_symbol(&ast.module_name))
                .param(Param::new("s", RAW_STRING_RETURN));
            fragments.push(CodeFragment::blank());
            fragments.extend(free.to_fragments());
            fragments.extend(Const::new(FREE_STRING, free.ident()).private().to_fragments());
        }
        fragments
    }

    fn extern_block(&self) -> Option<(&'static str, &'static str)> {
        None
    }

    fn namespace_open(&self, name: &str) -> Vec<String> {
        vec![Container::new(ZIG_NAMING.safe_name(name), "struct").header()]
    }

    fn namespace_close(&self, _name: &str) -> String {
        "};".to_string()
    }

    fn function(&self, f: &FunctionNode, scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        let mut decl = ExternFn::new(&f.mangled_name);
        for param in self.params(f)? {
            decl = decl.param(param);
        }
        let decl = decl.returns(self.return_type(f)?);

        let mut fragments = decl.to_fragments();
        fragments.extend(
            Const::new(ZIG_NAMING.safe_name(scope.binding_name(f)), decl.ident()).to_fragments(),
        );
        Ok(fragments)
    }

    fn proxy(
        &self,
        f: &FunctionNode,
        proxy: &TypeProxy,
        scope: &Scope,
    ) -> Result<ProxyFragments, CodegenError> {
        let raw_fn = &proxy.proxy;

        let mut raw = ExternFn::new(&raw_fn.mangled_name);
        for p in &raw_fn.parameters {
            raw = if proxy.is_parameter_proxied(&p.name) {
                raw.param(Param::new(ZIG_NAMING.safe_name(&p.name), RAW_STRING_PARAM))
            } else {
                raw.param(self.param(p)?)
            };
        }
        raw = if proxy.is_return_proxied {
            raw.returns(RAW_STRING_RETURN)
        } else {
            raw.returns(self.return_type(raw_fn)?)
        };

        // Zig rejects shadowing, so wrapper locals avoid the parameters,
        // the wrapper itself and the file-level declarations.
        let wrapper_name = ZIG_NAMING.safe_name(scope.binding_name(f));
        let mut locals = LocalNames::new(
            f.parameters
                .iter()
                .map(|p| ZIG_NAMING.safe_name(&p.name))
                .chain([wrapper_name.clone(), "std".into(), FREE_STRING.into()]),
        );
        let allocator = locals.fresh("allocator");

        let mut wrapper =
            Fn::new(wrapper_name).param(Param::new(&allocator, "std.mem.Allocator"));
        let mut args = Vec::new();
        for p in &f.parameters {
            let name = ZIG_NAMING.safe_name(&p.name);
            if proxy.is_parameter_proxied(&p.name) {
                let terminated = ZIG_NAMING.safe_name(&locals.fresh(&format!("{}_z", p.name)));
                wrapper = wrapper
                    .param(Param::new(&name, "[]const u8"))
                    .body_line(format!(
                        "const {} = try {}.dupeZ(u8, {});",
                        terminated, allocator, name
                    ))
                    .body_line(format!("defer {}.free({});", allocator, terminated));
                args.push(format!("{}.ptr", terminated));
            } else {
                wrapper = wrapper.param(self.param(p)?);
                args.push(name);
            }
        }
        let call = format!("{}({})", raw.ident(), args.join(", "));

        wrapper = if proxy.is_return_proxied {
            let raw = locals.fresh("raw");
            wrapper
                .returns("![]u8")
                .body_line(format!("const {} = {};", raw, call))
                .body_line(format!("defer {}({});", FREE_STRING, raw))
                .body_line(format!(
                    "return {}.dupe(u8, std.mem.span({}));",
                    allocator, raw
                ))
        } else {
            wrapper
                .returns(format!("!{}", self.return_type(f)?))
                .body_line(format!("return {};", call))
        };

        Ok(ProxyFragments {
            raw: raw.to_fragments(),
            wrapper: wrapper.to_fragments(),
        })
    }

    fn enumeration(&self, e: &EnumNode, _scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        let name = ZIG_NAMING.safe_name(&e.name);
        let tag = self
            .types
            .render_enum_tag(e.tag_type.as_ref())?
            .unwrap_or("c_int");

        if e.enumerators.is_empty() {
            return Ok(Const::new(name, tag).to_fragments());
        }

        // Enum values must be unique: a repeated value becomes a declaration
        // naming the first field that holds it, and the remaining fields
        // spell out their values.
        let aliases = e.aliases();
        let mut decl = Container::new(&name, format!("enum({})", tag));
        for (enumerator, (_, resolved)) in e.enumerators.iter().zip(e.resolved_values()) {
            if aliases.iter().any(|(alias, _)| *alias == enumerator.name) {
                continue;
            }
            let variant = ZIG_NAMING.safe_name(&enumerator.name);
            let line = match &enumerator.value {
                _ if !aliases.is_empty() => format!("{} = {},", variant, resolved),
                Some(value) => format!("{} = {},", variant, self.types.literal(value)?),
                None => format!("{},", variant),
            };
            decl = decl.item(CodeFragment::line(line));
        }
        if !aliases.is_empty() {
            decl = decl.item(CodeFragment::blank());
            for (alias, canonical) in aliases {
                decl = decl.item(CodeFragment::line(format!(
                    "pub const {} = {}.{};",
                    ZIG_NAMING.safe_name(alias),
                    name,
                    ZIG_NAMING.safe_name(canonical)
                )));
            }
        }
        Ok(decl.to_fragments())
    }

    fn class(&self, c: &ClassNode, _scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        let name = ZIG_NAMING.safe_name(&c.name);
        let mut decl = Container::new(&name, "extern struct");
        for member in &c.members {
            decl = decl.item(CodeFragment::line(format!(
                "{}: {},",
                ZIG_NAMING.safe_name(&member.name),
                self.types.render_type(&member.ty)?
            )));
        }

        if c.methods.is_empty() {
            return Ok(decl.to_fragments());
        }

        let (methods, raw) = self.method_fragments(c, &name)?;
        if !c.members.is_empty() {
            decl = decl.item(CodeFragment::blank());
        }
        let mut fragments = decl.items(methods).to_fragments();
        fragments.push(CodeFragment::blank());
        fragments.extend(raw);
        Ok(fragments)
    }

    fn variable(
        &self,
        v: &VariableNode,
        _scope: &Scope,
    ) -> Result<Vec<CodeFragment>, CodegenError> {
        let value = v.value.as_ref().ok_or_else(|| CodegenError::MissingValue {
            name: v.name.clone(),
            target: Language::Zig,
        })?;
        Ok(self.constant(&v.name, &v.ty, value)?.to_fragments())
    }
}
