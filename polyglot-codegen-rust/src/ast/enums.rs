//! Rust enum builder.

use polyglot_codegen::builder::{CodeFragment, Renderable};

/// A variant in a fieldless Rust enum.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    /// Explicit discriminant, already rendered.
    pub value: Option<String>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Builder for Rust enums.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    derives: Vec<String>,
    attrs: Vec<String>,
    variants: Vec<Variant>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            derives: Vec::new(),
            attrs: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    fn variants_to_fragments(&self) -> Vec<CodeFragment> {
        self.variants
            .iter()
            .map(|variant| match &variant.value {
                Some(value) => CodeFragment::line(format!("{} = {},", variant.name, value)),
                None => CodeFragment::line(format!("{},", variant.name)),
            })
            .collect()
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        for attr in &self.attrs {
            fragments.push(CodeFragment::line(format!("#[{}]", attr)));
        }

        if !self.derives.is_empty() {
            fragments.push(CodeFragment::line(format!(
                "#[derive({})]",
                self.derives.join(", ")
            )));
        }

        if self.variants.is_empty() {
            fragments.push(CodeFragment::line(format!("pub enum {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::block(
                format!("pub enum {} {{", self.name),
                self.variants_to_fragments(),
                Some("}".to_string()),
            ));
        }

        fragments
    }
}
