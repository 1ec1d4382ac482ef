//! Rust binding generator.

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
use polyglot_core::{UnicodeEscape, escape_c_string};
use polyglot_ir::{
    Ast, ClassNode, EnumNode, FunctionNode, Language, Literal, QualifiedType, TypeProxy, Value,
    VariableNode,
};

use crate::{
    ast::{EXTERN_BLOCK_OPEN, Enum, ExternBlock, ExternFn, Field, Fn, Impl, Param, Struct, Variant},
    naming::RUST_NAMING,
    type_mapper::RustTypeMapper,
};

const RAW_STRING_PARAM: &str = "*const std::ffi::c_char";
const RAW_STRING_RETURN: &str = "*mut std::ffi::c_char";
/// Module-local name of the function releasing proxied return strings.
const FREE_STRING: &str = "polyglot_free_string";

/// Rust binding generator.
///
/// Functions are declared in `unsafe extern "C"` blocks with `#[link_name]`
/// bound to the mangled name, namespaces become nested `pub mod`s, and
/// owned strings cross the boundary through proxies wrapped in safe
/// functions taking `&str` and returning `String`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator {
    types: RustTypeMapper,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    fn param(&self, p: &VariableNode) -> Result<Param, CodegenError> {
        Ok(Param::new(
            RUST_NAMING.safe_name(&p.name),
            self.types.render_type(&p.ty)?,
        ))
    }

    /// `None` for `void`, `!` for a `void` function that never returns.
    fn return_type(&self, f: &FunctionNode) -> Result<Option<String>, CodegenError> {
        if f.return_type.is_void() {
            return Ok(f.flags.noreturn.then(|| "!".to_string()));
        }
        self.types.render_unborrowed(&f.return_type).map(Some)
    }

    fn method_fragments(&self, c: &ClassNode) -> Result<Vec<CodeFragment>, CodegenError> {
        let class_name = RUST_NAMING.safe_name(&c.name);
        let mut methods = Impl::new(&class_name);
        let mut raw = ExternBlock::new();

        for binding in method_bindings(c) {
            let method = binding.method;
            let params = method
                .parameters
                .iter()
                .map(|p| self.param(p))
                .collect::<Result<Vec<_>, _>>()?;
            let ret = self.return_type(method)?;

            let mut args: Vec<String> = params.iter().map(|p| p.name.clone()).collect();
            let mut forward = Fn::new(RUST_NAMING.safe_name(&binding.alias));
            let mut extern_fn = ExternFn::new(&binding.symbol, &method.mangled_name).private();
            if !method.flags.is_static {
                forward = forward.param(Param::receiver("&mut self"));
                extern_fn = extern_fn.param(Param::new("this", format!("*mut {}", class_name)));
                args.insert(0, "self".to_string());
            }
            for param in params {
                forward = forward.param(param.clone());
                extern_fn = extern_fn.param(param);
            }

            methods = methods.method(forward.returns_opt(ret.clone()).body_line(format!(
                "unsafe {{ {}({}) }}",
                binding.symbol,
                args.join(", ")
            )));
            raw = raw.item(extern_fn.returns_opt(ret));
        }

        let mut fragments = vec![CodeFragment::blank()];
        fragments.extend(methods.to_fragments());
        fragments.push(CodeFragment::blank());
        fragments.extend(raw.to_fragments());
        Ok(fragments)
    }

    fn constant_text(
        &self,
        name: &str,
        ty: &QualifiedType,
        value: &Value,
    ) -> Result<String, CodegenError> {
        let name = RUST_NAMING.safe_name(name);
        if let (true, Literal::String(s)) = (ty.is_owned_string(), value.literal()) {
            return Ok(format!(
                "pub const {}: &str = \"{}\";",
                name,
                escape_c_string(s, UnicodeEscape::Braced)
            ));
        }
        if ty.is_indirect() {
            return Err(self.types.unsupported_type(ty));
        }
        Ok(format!(
            "pub const {}: {} = {};",
            name,
            self.types.render_type(ty)?,
            self.types.render_value(value)?
        ))
    }
}

impl BindingCodegen for Generator {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn type_to_text(&self, ty: &QualifiedType) -> Result<String, CodegenError> {
        self.types.render_type(ty)
    }

    fn value_to_text(&self, value: &Value) -> Result<String, CodegenError> {
        self.types.render_value(value)
    }

    fn render(&self, ast: &Ast, opts: &GenerateOptions) -> Result<ModuleOutput, CodegenError> {
        emit_module(self, ast, opts)
    }
}

impl Emitter for Generator {
    fn target(&self) -> Language {
        Language::Rust
    }

    fn indent(&self) -> Indent {
        Indent::of(Language::Rust)
    }

    fn prelude(&self, ast: &Ast) -> Vec<CodeFragment> {
        if !ast.has_proxies() {
            return Vec::new();
        }
        ExternBlock::new()
            .item(
                ExternFn::new(FREE_STRING, free_string_symbol(&ast.module_name))
                    .private()
                    .param(Param::new("s", RAW_STRING_RETURN)),
            )
            .to_fragments()
    }

    fn extern_block(&self) -> Option<(&'static str, &'static str)> {
        Some((EXTERN_BLOCK_OPEN, "}"))
    }

    fn namespace_open(&self, name: &str) -> Vec<String> {
        vec![
            "#[allow(non_snake_case)]".to_string(),
            format!("pub mod {} {{", RUST_NAMING.safe_name(name)),
        ]
    }

    fn namespace_close(&self, _name: &str) -> String {
        "}".to_string()
    }

    fn function(&self, f: &FunctionNode, scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        let name = RUST_NAMING.safe_name(scope.binding_name(f));
        let mut decl = ExternFn::new(name, &f.mangled_name);
        for p in &f.parameters {
            decl = decl.param(self.param(p)?);
        }
        Ok(decl.returns_opt(self.return_type(f)?).to_fragments())
    }

    fn proxy(
        &self,
        f: &FunctionNode,
        proxy: &TypeProxy,
        scope: &Scope,
    ) -> Result<ProxyFragments, CodegenError> {
        let raw_fn = &proxy.proxy;

        let mut raw = ExternFn::new(&raw_fn.name, &raw_fn.mangled_name).private();
        for p in &raw_fn.parameters {
            raw = if proxy.is_parameter_proxied(&p.name) {
                raw.param(Param::new(RUST_NAMING.safe_name(&p.name), RAW_STRING_PARAM))
            } else {
                raw.param(self.param(p)?)
            };
        }
        raw = if proxy.is_return_proxied {
            raw.returns(RAW_STRING_RETURN)
        } else {
            raw.returns_opt(self.return_type(raw_fn)?)
        };

        let mut wrapper =
            Fn::new(RUST_NAMING.safe_name(scope.binding_name(f))).attr("allow(non_snake_case)");
        let mut args = Vec::new();
        for p in &f.parameters {
            let name = RUST_NAMING.safe_name(&p.name);
            if proxy.is_parameter_proxied(&p.name) {
                wrapper = wrapper.param(Param::new(&name, "&str")).body_line(format!(
                    "let {0} = std::ffi::CString::new({0}).expect(\"string argument contains an interior NUL byte\");",
                    name
                ));
                args.push(format!("{}.as_ptr()", name));
            } else {
                wrapper = wrapper.param(self.param(p)?);
                args.push(name);
            }
        }
        let call = format!("{}({})", raw_fn.name, args.join(", "));

        wrapper = if proxy.is_return_proxied {
            wrapper.returns_opt(Some("String".to_string())).body_block(
                "unsafe {",
                vec![
                    format!("let raw = {};", call),
                    "let result = std::ffi::CStr::from_ptr(raw).to_string_lossy().into_owned();"
                        .to_string(),
                    format!("{}{}(raw);", "super::".repeat(scope.depth()), FREE_STRING),
                    "result".to_string(),
                ],
            )
        } else {
            wrapper
                .returns_opt(self.return_type(f)?)
                .body_line(format!("unsafe {{ {} }}", call))
        };

        Ok(ProxyFragments {
            raw: raw.to_fragments(),
            wrapper: wrapper.to_fragments(),
        })
    }

    fn enumeration(&self, e: &EnumNode, _scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        let name = RUST_NAMING.safe_name(&e.name);
        let tag = self
            .types
            .render_enum_tag(e.tag_type.as_ref())?
            .unwrap_or("i32");

        // A zero-variant enum cannot carry a `repr`.
        if e.enumerators.is_empty() {
            return Ok(vec![CodeFragment::line(format!(
                "pub type {} = {};",
                name, tag
            ))]);
        }

        let mut decl = Enum::new(&name)
            .attr(format!("repr({})", tag))
            .derive("Debug")
            .derive("Clone")
            .derive("Copy")
            .derive("PartialEq")
            .derive("Eq");

        // Discriminants must be unique, so repeated values become associated
        // constants. Once one is dropped every variant spells its value out.
        let aliases = e.aliases();
        let resolved = e.resolved_values();
        for (enumerator, (_, resolved)) in e.enumerators.iter().zip(resolved) {
            if aliases.iter().any(|(alias, _)| *alias == enumerator.name) {
                continue;
            }
            let mut variant = Variant::new(RUST_NAMING.safe_name(&enumerator.name));
            if !aliases.is_empty() {
                variant = variant.value(resolved.to_string());
            } else if let Some(value) = &enumerator.value {
                variant = variant.value(self.types.render_value(value)?);
            }
            decl = decl.variant(variant);
        }

        let mut fragments = decl.to_fragments();
        if !aliases.is_empty() {
            let mut consts = Impl::new(&name).attr("allow(non_upper_case_globals)");
            for (alias, canonical) in aliases {
                consts = consts.constant(
                    RUST_NAMING.safe_name(alias),
                    "Self",
                    format!("Self::{}", RUST_NAMING.safe_name(canonical)),
                );
            }
            fragments.push(CodeFragment::blank());
            fragments.extend(consts.to_fragments());
        }
        Ok(fragments)
    }

    fn class(&self, c: &ClassNode, _scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        let mut decl = Struct::new(RUST_NAMING.safe_name(&c.name)).attr("repr(C)");
        for member in &c.members {
            decl = decl.field(Field::new(
                RUST_NAMING.safe_name(&member.name),
                self.types.render_unborrowed(&member.ty)?,
            ));
        }

        let mut fragments = decl.to_fragments();
        if !c.methods.is_empty() {
            fragments.extend(self.method_fragments(c)?);
        }
        Ok(fragments)
    }

    fn variable(
        &self,
        v: &VariableNode,
        _scope: &Scope,
    ) -> Result<Vec<CodeFragment>, CodegenError> {
        let value = v.value.as_ref().ok_or_else(|| CodegenError::MissingValue {
            name: v.name.clone(),
            target: Language::Rust,
        })?;
        Ok(vec![CodeFragment::line(
            self.constant_text(&v.name, &v.ty, value)?,
        )])
    }
}
