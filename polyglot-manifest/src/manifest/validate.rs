//! Validation context and structural checks for declaration manifests.

use std::sync::Arc;

use miette::SourceSpan;

use super::Manifest;
use crate::{Declaration, MethodDecl, Result, TypeSpec, VarDecl, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Holds the source text and the path through the manifest (for example
/// `geo::area.params`) so nested checks can report precise locations.
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    path: Vec<String>,
}

impl ParseContext {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Describe what is being validated, e.g. "parameter in 'geo::area'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Validate that a name is a C-style identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        match identifier_problem(name) {
            None => Ok(()),
            Some(reason) => Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            )),
        }
    }

    /// Validate that a required string field is present and non-empty.
    pub fn require(&self, value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(self.source.validation_error(
                format!("{} must not be empty", self.context_for(field)),
                None,
            ));
        }
        Ok(())
    }

    /// Named kinds (`enum`, `class`) must carry the referenced type name.
    pub fn validate_type(&self, ty: &TypeSpec, kind: &str) -> Result<()> {
        if !ty.is_named_kind() {
            return Ok(());
        }
        match ty.detail().name {
            Some(name) if !name.is_empty() => Ok(()),
            _ => Err(self.source.missing_type_name_error(
                ty.base(),
                self.context_for(kind),
                find_quoted_span(self.source.src(), ty.base()),
            )),
        }
    }

    fn validate_vars(&self, vars: &[VarDecl], kind: &str) -> Result<()> {
        for var in vars {
            self.validate_name(&var.name, kind)?;
            self.push(&var.name).validate_type(&var.ty, kind)?;
        }
        Ok(())
    }

    fn validate_method(&self, method: &MethodDecl, kind: &str) -> Result<()> {
        let ctx = self.push(&method.name);
        ctx.require(&method.mangled, &format!("{kind} mangled name"))?;
        ctx.validate_type(&method.returns, "return type")?;
        ctx.validate_vars(&method.params, "parameter")
    }
}

pub(crate) fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    for decl in &manifest.declarations {
        ctx.validate_name(decl.name(), decl.kind_str())?;
        for segment in decl.namespace() {
            ctx.validate_name(segment, "namespace")?;
        }

        let decl_ctx = ctx.push(decl.qualified_name());
        decl_ctx.require(decl.file(), "file")?;

        match decl {
            Declaration::Function(f) => {
                decl_ctx.require(&f.mangled, "mangled name")?;
                decl_ctx.validate_type(&f.returns, "return type")?;
                decl_ctx.validate_vars(&f.params, "parameter")?;
            }
            Declaration::Enum(e) => {
                if let Some(tag) = &e.tag {
                    decl_ctx.validate_type(tag, "enum tag type")?;
                }
                for enumerator in &e.enumerators {
                    decl_ctx.validate_name(&enumerator.name, "enumerator")?;
                }
            }
            Declaration::Class(c) => {
                decl_ctx.validate_vars(&c.members, "member")?;
                for ctor in &c.constructors {
                    decl_ctx.validate_method(ctor, "constructor")?;
                }
                if let Some(dtor) = &c.destructor {
                    decl_ctx.require(&dtor.mangled, "destructor mangled name")?;
                }
                for method in &c.methods {
                    decl_ctx.validate_name(&method.name, "method")?;
                    decl_ctx.validate_method(method, "method")?;
                }
            }
            Declaration::Variable(v) => {
                decl_ctx.validate_type(&v.ty, "variable type")?;
            }
        }
    }
    Ok(())
}

/// Returns why `name` is not a valid identifier, or `None` if it is.
pub(crate) fn identifier_problem(name: &str) -> Option<&'static str> {
    if polyglot_core::is_identifier(name) {
        return None;
    }
    match name.chars().next() {
        None => Some("name cannot be empty"),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            Some("name must start with a letter or underscore")
        }
        _ => Some("name must contain only letters, numbers, and underscores"),
    }
}

/// Find the span of a name in the TOML source.
///
/// Looks for `name = "value"` first, then for any quoted occurrence.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("name = {quote}{name}{quote}");
        if let Some(pos) = src.find(&pattern) {
            // The name starts after 'name = "' (8 characters)
            return Some(SourceSpan::from((pos + 8, name.len())));
        }
    }
    find_quoted_span(src, name)
}

fn find_quoted_span(src: &str, value: &str) -> Option<SourceSpan> {
    let pattern = format!("\"{}\"", value);
    src.find(&pattern)
        .map(|pos| SourceSpan::from((pos + 1, value.len())))
}
