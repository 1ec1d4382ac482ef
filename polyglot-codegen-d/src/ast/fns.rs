//! D function builders.

use polyglot_codegen::builder::{CodeFragment, Renderable};

/// A parameter, optionally with a default argument.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
        }
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }
}

fn param_list(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| match &p.default {
            Some(value) => format!("{} {} = {}", p.ty, p.name, value),
            None => format!("{} {}", p.ty, p.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// A foreign function pinned to its linkage symbol:
/// `pragma(mangle, "<symbol>") R name(...) attrs;`
#[derive(Debug, Clone)]
pub struct MangledFn {
    name: String,
    symbol: String,
    params: Vec<Param>,
    return_type: String,
    attrs: Vec<&'static str>,
}

impl MangledFn {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            params: Vec::new(),
            return_type: "void".to_string(),
            attrs: Vec::new(),
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

    /// Trailing function attribute such as `nothrow`.
    pub fn attr(mut self, attr: &'static str) -> Self {
        self.attrs.push(attr);
        self
    }
}

impl Renderable for MangledFn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let attrs: String = self.attrs.iter().map(|a| format!(" {}", a)).collect();
        vec![CodeFragment::line(format!(
            "pragma(mangle, \"{}\") {} {}({}){};",
            self.symbol,
            self.return_type,
            self.name,
            param_list(&self.params),
            attrs
        ))]
    }
}

/// Builder for D functions with a body.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    prefix: Vec<&'static str>,
    params: Vec<Param>,
    return_type: String,
    body: Vec<CodeFragment>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: Vec::new(),
            params: Vec::new(),
            return_type: "void".to_string(),
            body: Vec::new(),
        }
    }

    /// Leading storage class or linkage, e.g. `static` or `extern(D)`.
    pub fn prefix(mut self, word: &'static str) -> Self {
        self.prefix.push(word);
        self
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
        let prefix: String = self.prefix.iter().map(|w| format!("{} ", w)).collect();
        vec![CodeFragment::block(
            format!(
                "{}{} {}({}) {{",
                prefix,
                self.return_type,
                self.name,
                param_list(&self.params)
            ),
            self.body.clone(),
            Some("}".to_string()),
        )]
    }
}
