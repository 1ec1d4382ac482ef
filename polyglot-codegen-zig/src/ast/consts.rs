//! Zig const declaration builder.

use polyglot_codegen::builder::{CodeFragment, Renderable};

/// Builder for container-level `const` declarations.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    value: String,
    ty: Option<String>,
    is_public: bool,
}

impl Const {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ty: None,
            is_public: true,
        }
    }

    /// Add a type annotation.
    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let vis = if self.is_public { "pub " } else { "" };
        let ty = match &self.ty {
            Some(ty) => format!(": {}", ty),
            None => String::new(),
        };
        vec![CodeFragment::line(format!(
            "{}const {}{} = {};",
            vis, self.name, ty, self.value
        ))]
    }
}
