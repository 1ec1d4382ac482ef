//! Rust impl block builder.

use polyglot_codegen::builder::{CodeFragment, Renderable};

use super::Fn;

/// Builder for inherent impl blocks.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    attrs: Vec<String>,
    consts: Vec<String>,
    methods: Vec<Fn>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attrs: Vec::new(),
            consts: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    /// Add `pub const name: ty = value;`.
    pub fn constant(mut self, name: impl AsRef<str>, ty: &str, value: impl AsRef<str>) -> Self {
        self.consts.push(format!(
            "pub const {}: {} = {};",
            name.as_ref(),
            ty,
            value.as_ref()
        ));
        self
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method);
        self
    }

    fn body(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> =
            self.consts.iter().map(CodeFragment::line).collect();
        for method in &self.methods {
            if !fragments.is_empty() {
                fragments.push(CodeFragment::Blank);
            }
            fragments.extend(method.to_fragments());
        }
        fragments
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self
            .attrs
            .iter()
            .map(|attr| CodeFragment::line(format!("#[{}]", attr)))
            .collect();
        fragments.push(CodeFragment::block(
            format!("impl {} {{", self.type_name),
            self.body(),
            Some("}".to_string()),
        ));
        fragments
    }
}
