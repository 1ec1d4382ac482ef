//! Rust function builders.

use polyglot_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A parameter in a Rust function.
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

    /// A method receiver such as `&mut self`.
    pub fn receiver(text: impl Into<String>) -> Self {
        Self::new(text, "")
    }
}

fn signature(is_public: bool, name: &str, params: &[Param], ret: Option<&str>) -> String {
    let vis = if is_public { "pub " } else { "" };
    let params = params
        .iter()
        .map(|p| {
            if p.ty.is_empty() {
                p.name.clone()
            } else {
                format!("{}: {}", p.name, p.ty)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    match ret {
        Some(ret) => format!("{}fn {}({}) -> {}", vis, name, params, ret),
        None => format!("{}fn {}({})", vis, name, params),
    }
}

/// A foreign function, declared inside an `unsafe extern "C"` block and
/// bound to its linkage name.
#[derive(Debug, Clone)]
pub struct ExternFn {
    name: String,
    link_name: String,
    is_public: bool,
    params: Vec<Param>,
    return_type: Option<String>,
}

impl ExternFn {
    pub fn new(name: impl Into<String>, link_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link_name: link_name.into(),
            is_public: true,
            params: Vec::new(),
            return_type: None,
        }
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Set the return type, leaving it unset for `None`.
    pub fn returns_opt(mut self, ty: Option<String>) -> Self {
        self.return_type = ty;
        self
    }
}

impl Renderable for ExternFn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![
            CodeFragment::line(format!("#[link_name = \"{}\"]", self.link_name)),
            CodeFragment::line(format!(
                "{};",
                signature(
                    self.is_public,
                    &self.name,
                    &self.params,
                    self.return_type.as_deref()
                )
            )),
        ]
    }
}

/// Builder for Rust functions with a body.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    attrs: Vec<String>,
    is_public: bool,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<CodeFragment>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            is_public: true,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns_opt(mut self, ty: Option<String>) -> Self {
        self.return_type = ty;
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Add a nested block, e.g. `unsafe { ... }`, to the function body.
    pub fn body_block(mut self, header: impl Into<String>, lines: Vec<String>) -> Self {
        self.body.push(CodeFragment::block(
            header,
            lines.into_iter().map(CodeFragment::Line).collect(),
            Some("}".to_string()),
        ));
        self
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self
            .attrs
            .iter()
            .map(|attr| CodeFragment::line(format!("#[{}]", attr)))
            .collect();
        fragments.push(CodeFragment::block(
            format!(
                "{} {{",
                signature(
                    self.is_public,
                    &self.name,
                    &self.params,
                    self.return_type.as_deref()
                )
            ),
            self.body.clone(),
            Some("}".to_string()),
        ));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extern_fn() {
        let f = ExternFn::new("add", "_Z3addii")
            .param(Param::new("a", "i32"))
            .param(Param::new("b", "i32"))
            .returns("i32");
        let mut builder = CodeBuilder::rust();
        builder.emit(&f);
        assert_eq!(
            builder.build(),
            "#[link_name = \"_Z3addii\"]\npub fn add(a: i32, b: i32) -> i32;\n"
        );
    }

    #[test]
    fn test_private_extern_fn() {
        let f = ExternFn::new("raw", "raw").private();
        let mut builder = CodeBuilder::rust();
        builder.emit(&f);
        assert!(builder.build().contains("\nfn raw();"));
    }

    #[test]
    fn test_fn_with_receiver_and_body() {
        let f = Fn::new("area")
            .param(Param::receiver("&mut self"))
            .returns_opt(Some("i32".into()))
            .body_line("unsafe { polyglot_Widget_method_area(self) }")
            .build();
        assert_eq!(
            f,
            "pub fn area(&mut self) -> i32 {\n    unsafe { polyglot_Widget_method_area(self) }\n}\n"
        );
    }

    #[test]
    fn test_fn_with_block() {
        let f = Fn::new("greet")
            .attr("allow(non_snake_case)")
            .body_block("unsafe {", vec!["call();".into()])
            .build();
        assert!(f.starts_with("#[allow(non_snake_case)]\npub fn greet() {\n"));
        assert!(f.contains("    unsafe {\n        call();\n    }\n"));
    }
}
