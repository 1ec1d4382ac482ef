//! C++ function builder.

use polyglot_codegen::builder::{CodeFragment, Renderable};

use crate::type_mapper::declarator;

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

/// A function declaration, or a definition once it has a body.
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    params: Vec<Param>,
    returns: String,
    prefix: Vec<&'static str>,
    suffix: Option<&'static str>,
    body: Option<Vec<String>>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: "void".to_string(),
            prefix: Vec::new(),
            suffix: None,
            body: None,
        }
    }

    /// Specifier written before the return type, such as `extern "C"`.
    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix.push(prefix);
        self
    }

    /// Specifier written after the parameter list.
    pub fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = Some(suffix);
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns = ty.into();
        self
    }

    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.get_or_insert_with(Vec::new).push(line.into());
        self
    }

    fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| declarator(&p.ty, &p.name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut text = String::new();
        for prefix in &self.prefix {
            text.push_str(prefix);
            text.push(' ');
        }
        text.push_str(&declarator(
            &self.returns,
            &format!("{}({})", self.name, params),
        ));
        if let Some(suffix) = self.suffix {
            text.push(' ');
            text.push_str(suffix);
        }
        text
    }
}

impl Renderable for Function {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let signature = self.signature();
        match &self.body {
            None => vec![CodeFragment::line(format!("{};", signature))],
            Some(lines) => vec![CodeFragment::block(
                format!("{} {{", signature),
                lines.iter().map(CodeFragment::line).collect(),
                Some("}".to_string()),
            )],
        }
    }
}
