//! Zig function builders.

use polyglot_codegen::builder::{CodeFragment, Renderable};

use crate::naming::quoted;

/// A parameter in a Zig function.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

fn param_list(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A foreign function named after its linkage symbol:
/// `extern fn @"<symbol>"(...) R;`
///
/// Zig links an extern function by its identifier, so the declaration
/// takes the symbol and callers reach it through a [`Const`] alias.
///
/// [`Const`]: super::Const
#[derive(Debug, Clone)]
pub struct ExternFn {
    symbol: String,
    params: Vec<Param>,
    return_type: String,
}

impl ExternFn {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            params: Vec::new(),
            return_type: "void".to_string(),
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = ty.into();
        self
    }

    /// `@"<symbol>"`, the identifier to alias or call.
    pub fn ident(&self) -> String {
        quoted(&self.symbol)
    }
}

impl Renderable for ExternFn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(format!(
            "extern fn {}({}) {};",
            self.ident(),
            param_list(&self.params),
            self.return_type
        ))]
    }
}

/// Builder for public Zig functions with a body.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    params: Vec<Param>,
    return_type: String,
    body: Vec<CodeFragment>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: "void".to_string(),
            body: Vec::new(),
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = ty.into();
        self
    }

    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::block(
            format!(
                "pub fn {}({}) {} {{",
                self.name,
                param_list(&self.params),
                self.return_type
            ),
            self.body.clone(),
            Some("}".to_string()),
        )]
    }
}

#[cfg(test)]
mod tests {
    use polyglot_codegen::builder::CodeBuilder;

    use super::*;

    fn build(node: &impl Renderable) -> String {
        let mut builder = CodeBuilder::zig();
        builder.emit(node);
        builder.build()
    }

    #[test]
    fn test_extern_fn() {
        let f = ExternFn::new("_Z3addii")
            .param(Param::new("a", "i32"))
            .param(Param::new("b", "i32"))
            .returns("i32");
        assert_eq!(build(&f), "extern fn @\"_Z3addii\"(a: i32, b: i32) i32;\n");
        assert_eq!(f.ident(), "@\"_Z3addii\"");
    }

    #[test]
    fn test_void_extern_fn() {
        assert_eq!(
            build(&ExternFn::new("_Z4stopv")),
            "extern fn @\"_Z4stopv\"() void;\n"
        );
    }

    #[test]
    fn test_fn_with_body() {
        let f = Fn::new("area")
            .param(Param::new("self", "*Widget"))
            .returns("i32")
            .body_line("return polyglot_Widget_method_area(self);");
        assert_eq!(
            build(&f),
            "pub fn area(self: *Widget) i32 {\n    return polyglot_Widget_method_area(self);\n}\n"
        );
    }
}
