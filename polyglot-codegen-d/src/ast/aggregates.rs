//! D struct and enum builders.

use polyglot_codegen::builder::{CodeFragment, Renderable};

use super::Fn;

/// Builder for `extern(C++) struct` declarations.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    /// `(type, name)` pairs.
    fields: Vec<(String, String)>,
    methods: Vec<Fn>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn field(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.fields.push((ty.into(), name.into()));
        self
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method);
        self
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let header = format!("extern(C++) struct {} {{", self.name);
        if self.fields.is_empty() && self.methods.is_empty() {
            return vec![CodeFragment::line(format!("{}}}", header))];
        }

        let mut body: Vec<CodeFragment> = self
            .fields
            .iter()
            .map(|(ty, name)| CodeFragment::line(format!("{} {};", ty, name)))
            .collect();
        for method in &self.methods {
            if !body.is_empty() {
                body.push(CodeFragment::blank());
            }
            body.extend(method.to_fragments());
        }
        vec![CodeFragment::block(header, body, Some("}".to_string()))]
    }
}

/// Builder for D enums with an optional base type.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    base: Option<String>,
    /// Member name and rendered value.
    members: Vec<(String, Option<String>)>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            members: Vec::new(),
        }
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn member(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.members.push((name.into(), value));
        self
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let header = match &self.base {
            Some(base) => format!("enum {} : {} {{", self.name, base),
            None => format!("enum {} {{", self.name),
        };
        let members = self
            .members
            .iter()
            .map(|(name, value)| match value {
                Some(value) => CodeFragment::line(format!("{} = {},", name, value)),
                None => CodeFragment::line(format!("{},", name)),
            })
            .collect();
        vec![CodeFragment::block(header, members, Some("}".to_string()))]
    }
}
