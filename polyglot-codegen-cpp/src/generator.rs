//! C++ proxy shim generator.

use polyglot_codegen::{
    CodegenError,
    builder::{CodeFragment, Indent, Renderable},
    generation::{Emitter, GenerateOptions, ModuleOutput, ProxyFragments, Scope, emit_module},
    language::{BindingCodegen, LocalNames, TypeMapper},
    proxy::free_string_symbol,
};
use polyglot_ir::{
    Ast, ClassNode, EnumNode, FunctionNode, Language, Node, QualifiedType, TypeProxy, Value,
    VariableNode,
};

use crate::{
    ast::{Function, Param},
    type_mapper::CppTypeMapper,
};

const SYSTEM_HEADERS: [&str; 5] = ["cstdint", "cstdlib", "cstring", "string", "utility"];
const DUP_STRING: &str = "polyglot_dup_string";

/// Generator for the C++ half of type proxies.
///
/// Each proxied function gets an `extern "C"` definition named after its
/// proxy symbol. String arguments arrive as NUL-terminated buffers and
/// returned strings leave as `malloc`ed copies released by the module's
/// free function. Without configured headers the originals are forward
/// declared, which only works for signatures made of built-in types.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    types: CppTypeMapper,
    headers: Vec<String>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include these headers instead of forward declaring the originals.
    ///
    /// Bare names are quoted; names already wrapped in `<>` or `""` are
    /// written as given.
    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    fn include(header: &str) -> String {
        if header.starts_with('<') || header.starts_with('"') {
            format!("#include {}", header)
        } else {
            format!("#include \"{}\"", header)
        }
    }

    fn forward_declaration(&self, f: &FunctionNode) -> Result<Function, CodegenError> {
        let mut decl = Function::new(&f.name).returns(self.types.render_type(&f.return_type)?);
        if f.flags.noreturn {
            decl = decl.prefix("[[noreturn]]");
        }
        for p in &f.parameters {
            decl = decl.param(Param::new(&p.name, self.types.render_type(&p.ty)?));
        }
        if f.flags.nothrow {
            decl = decl.suffix("noexcept");
        }
        Ok(decl)
    }

    fn dup_string() -> Function {
        Function::new(DUP_STRING)
            .returns("char *")
            .param(Param::new("s", "const std::string &"))
            .suffix("noexcept")
            .body_line("char *buffer = static_cast<char *>(std::malloc(s.size() + 1));")
            .body_line("if (buffer == nullptr) {")
            .body_line("    std::abort();")
            .body_line("}")
            .body_line("std::memcpy(buffer, s.c_str(), s.size() + 1);")
            .body_line("return buffer;")
    }
}

impl BindingCodegen for Generator {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn file_extension(&self) -> &'static str {
        "cpp"
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

    fn file_name(&self, module_name: &str) -> String {
        format!("{}_proxies.{}", module_name, self.file_extension())
    }
}

impl Emitter for Generator {
    fn target(&self) -> Language {
        Language::Cpp
    }

    fn indent(&self) -> Indent {
        Indent::of(Language::Cpp)
    }

    fn prelude(&self, ast: &Ast) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = SYSTEM_HEADERS
            .iter()
            .map(|h| CodeFragment::line(format!("#include <{}>", h)))
            .collect();
        fragments.extend(self.headers.iter().map(|h| CodeFragment::line(Self::include(h))));

        fragments.push(CodeFragment::blank());
        fragments.push(CodeFragment::line("namespace {"));
        fragments.push(CodeFragment::blank());
        fragments.extend(Self::dup_string().to_fragments());
        fragments.push(CodeFragment::blank());
        fragments.push(CodeFragment::line("} // namespace"));

        let free = Function::new(free_string_symbol(&ast.module_name))
            .prefix("extern \"C\"")
            .param(Param::new("s", "char *"))
            .suffix("noexcept")
            .body_line("std::free(s);");
        fragments.push(CodeFragment::blank());
        fragments.extend(free.to_fragments());
        fragments
    }

    fn extern_block(&self) -> Option<(&'static str, &'static str)> {
        None
    }

    fn namespace_open(&self, name: &str) -> Vec<String> {
        vec![format!("namespace {} {{", name)]
    }

    fn namespace_close(&self, name: &str) -> String {
        format!("}} // namespace {}", name)
    }

    fn includes(&self, node: &Node) -> bool {
        match node {
            Node::Function(f) => f.is_proxied(),
            Node::Namespace(ns) => ns.ast.has_proxies(),
            _ => false,
        }
    }

    // Only proxied functions reach this generator; see `includes`.
    fn function(&self, _f: &FunctionNode, _scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        Ok(Vec::new())
    }

    fn proxy(
        &self,
        f: &FunctionNode,
        proxy: &TypeProxy,
        scope: &Scope,
    ) -> Result<ProxyFragments, CodegenError> {
        let raw_fn = &proxy.proxy;

        let mut shim = Function::new(&raw_fn.name)
            .prefix("extern \"C\"")
            .returns(self.types.render_type(&raw_fn.return_type)?)
            .suffix("noexcept");
        for p in &raw_fn.parameters {
            shim = shim.param(Param::new(&p.name, self.types.render_type(&p.ty)?));
        }

        let mut locals = LocalNames::new(f.parameters.iter().map(|p| p.name.as_str()));
        let mut args = Vec::new();
        for p in &f.parameters {
            if proxy.is_parameter_proxied(&p.name) {
                let local = locals.fresh(&format!("{}_value", p.name));
                shim = shim.body_line(format!(
                    "std::string {}({} != nullptr ? {} : \"\");",
                    local, p.name, p.name
                ));
                // A temporary cannot bind to a mutable lvalue reference.
                args.push(if p.ty.is_reference {
                    local
                } else {
                    format!("std::move({})", local)
                });
            } else if p.ty.is_rvalue_reference {
                args.push(format!("std::move({})", p.name));
            } else {
                args.push(p.name.clone());
            }
        }
        let call = format!("::{}({})", scope.qualify(&f.name), args.join(", "));

        shim = if proxy.is_return_proxied {
            shim.body_line(format!("return {}({});", DUP_STRING, call))
        } else if f.return_type.is_void() {
            shim.body_line(format!("{};", call))
        } else {
            shim.body_line(format!("return {};", call))
        };

        let raw = if self.headers.is_empty() {
            self.forward_declaration(f)?.to_fragments()
        } else {
            Vec::new()
        };
        Ok(ProxyFragments {
            raw,
            wrapper: shim.to_fragments(),
        })
    }

    fn enumeration(&self, _e: &EnumNode, _scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        Ok(Vec::new())
    }

    fn class(&self, _c: &ClassNode, _scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError> {
        Ok(Vec::new())
    }

    fn variable(
        &self,
        _v: &VariableNode,
        _scope: &Scope,
    ) -> Result<Vec<CodeFragment>, CodegenError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use polyglot_codegen::{
        generation::Timestamp,
        proxy::{OwnedStringPolicy, synthesize},
    };
    use polyglot_ir::{BaseType, ClassKind};
    use pretty_assertions::assert_eq;

    use super::*;

    const ROOT: [&str; 0] = [];

    fn proxied(mut f: FunctionNode) -> Node {
        f.type_proxy = synthesize(&f, &OwnedStringPolicy);
        f.into()
    }

    fn render_with(generator: &Generator, ast: &Ast) -> ModuleOutput {
        let opts = GenerateOptions::default().with_timestamp(Timestamp::Fixed("T".into()));
        generator.render(ast, &opts).unwrap()
    }

    /// Everything after the free function.
    fn declarations(output: &ModuleOutput) -> &str {
        output
            .content
            .split_once("    std::free(s);\n}\n\n")
            .map(|(_, rest)| rest)
            .unwrap_or_default()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(Generator::new().file_name("example"), "example_proxies.cpp");
    }

    #[test]
    fn test_only_proxied_functions_are_emitted() {
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(
            &ROOT,
            FunctionNode::new("add", "_Z3addii", QualifiedType::new(BaseType::Int32)).into(),
        );
        ast.insert(&ROOT, EnumNode::new("Color").into());
        ast.insert(&ROOT, ClassNode::new("Point", ClassKind::Struct).into());
        ast.insert(
            &["Plain"],
            FunctionNode::new("f", "_ZN5Plain1fEv", QualifiedType::void()).into(),
        );
        ast.insert(
            &ROOT,
            proxied(
                FunctionNode::new("log", "_Z3logRSs", QualifiedType::void())
                    .param(VariableNode::new("line", QualifiedType::string().reference())),
            ),
        );

        let output = render_with(&Generator::new(), &ast);
        assert!(output.is_complete());
        assert_eq!(
            declarations(&output),
            concat!(
                "void log(std::string &line);\n",
                "\n",
                "extern \"C\" void polyglot_proxy__Z3logRSs(const char *line) noexcept {\n",
                "    std::string line_value(line != nullptr ? line : \"\");\n",
                "    ::log(line_value);\n",
                "}\n",
            )
        );
    }

    #[test]
    fn test_headers_replace_forward_declarations() {
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(
            &ROOT,
            proxied(FunctionNode::new("name", "_Z4namev", QualifiedType::string())),
        );
        let generator = Generator::new().with_headers(["m.hpp", "<vector>"]);
        let output = render_with(&generator, &ast);

        assert!(output.content.contains("#include <utility>\n#include \"m.hpp\"\n#include <vector>\n"));
        assert_eq!(
            declarations(&output),
            "extern \"C\" char *polyglot_proxy__Z4namev() noexcept {\n    return polyglot_dup_string(::name());\n}\n"
        );
    }

    #[test]
    fn test_rvalue_and_by_value_strings_are_moved() {
        let mut take = FunctionNode::new("take", "_Z4takeOSsSsi", QualifiedType::new(BaseType::Int64))
            .param(VariableNode::new("a", QualifiedType::string().rvalue_reference()))
            .param(VariableNode::new("b", QualifiedType::string()))
            .param(VariableNode::new("n", QualifiedType::new(BaseType::Int32)));
        take.flags.nothrow = true;
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(&ROOT, proxied(take));

        let text = declarations(&render_with(&Generator::new(), &ast)).to_string();
        assert!(text.starts_with("int64_t take(std::string &&a, std::string b, int32_t n) noexcept;\n"));
        assert!(text.contains("    return ::take(std::move(a_value), std::move(b_value), n);\n"));
    }

    #[test]
    fn test_string_locals_avoid_parameter_names() {
        let f = FunctionNode::new("wrap", "_Z4wrapSsi", QualifiedType::void())
            .param(VariableNode::new("s", QualifiedType::string()))
            .param(VariableNode::new("s_value", QualifiedType::new(BaseType::Int32)));
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(&ROOT, proxied(f));

        let text = declarations(&render_with(&Generator::new(), &ast)).to_string();
        assert!(text.contains("    std::string s_value_1(s != nullptr ? s : \"\");\n"));
        assert!(text.contains("    ::wrap(std::move(s_value_1), s_value);\n"));
    }

    #[test]
    fn test_wide_integer_skips_the_proxy() {
        let mut ast = Ast::new("m", Language::Cpp);
        ast.insert(
            &ROOT,
            proxied(
                FunctionNode::new("wide", "_Z4wideSsn", QualifiedType::void())
                    .param(VariableNode::new("s", QualifiedType::string()))
                    .param(VariableNode::new("x", QualifiedType::new(BaseType::Int128))),
            ),
        );
        let output = render_with(&Generator::new(), &ast);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].reason, "type 'int128' is not supported by C++");
        assert_eq!(declarations(&output), "");
    }
}
