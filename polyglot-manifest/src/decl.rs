//! `[[decl]]` tables.

use serde::Deserialize;

use crate::{TypeSpec, ValueSpec};

/// One declaration discovered by the extraction front-end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Declaration {
    Function(FunctionDecl),
    Enum(EnumDecl),
    Class(ClassDecl),
    Variable(VariableDecl),
}

impl Declaration {
    pub fn kind_str(&self) -> &'static str {
        match self {
            Declaration::Function(_) => "function",
            Declaration::Enum(_) => "enum",
            Declaration::Class(_) => "class",
            Declaration::Variable(_) => "variable",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Declaration::Function(d) => &d.name,
            Declaration::Enum(d) => &d.name,
            Declaration::Class(d) => &d.name,
            Declaration::Variable(d) => &d.name,
        }
    }

    /// Originating source file.
    pub fn file(&self) -> &str {
        match self {
            Declaration::Function(d) => &d.file,
            Declaration::Enum(d) => &d.file,
            Declaration::Class(d) => &d.file,
            Declaration::Variable(d) => &d.file,
        }
    }

    pub fn line(&self) -> Option<u32> {
        match self {
            Declaration::Function(d) => d.line,
            Declaration::Enum(d) => d.line,
            Declaration::Class(d) => d.line,
            Declaration::Variable(d) => d.line,
        }
    }

    pub fn namespace(&self) -> &[String] {
        match self {
            Declaration::Function(d) => &d.namespace,
            Declaration::Enum(d) => &d.namespace,
            Declaration::Class(d) => &d.namespace,
            Declaration::Variable(d) => &d.namespace,
        }
    }

    /// Source location as `file:line`, or just the file.
    pub fn location(&self) -> String {
        match self.line() {
            Some(line) => format!("{}:{}", self.file(), line),
            None => self.file().to_string(),
        }
    }

    /// Namespace-qualified name, e.g. `Foo::Bar::greet`.
    pub fn qualified_name(&self) -> String {
        let mut parts: Vec<&str> = self.namespace().iter().map(String::as_str).collect();
        parts.push(self.name());
        parts.join("::")
    }
}

/// Function modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionFlag {
    Noreturn,
    Nothrow,
    Static,
    Virtual,
    Override,
    Final,
}

/// A parameter or class member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeSpec,
    #[serde(default)]
    pub default: Option<ValueSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionDecl {
    pub file: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub namespace: Vec<String>,
    pub name: String,
    pub mangled: String,
    #[serde(default)]
    pub returns: TypeSpec,
    #[serde(default)]
    pub params: Vec<VarDecl>,
    #[serde(default)]
    pub flags: Vec<FunctionFlag>,
}

/// A method, constructor or destructor of a class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDecl {
    pub name: String,
    pub mangled: String,
    #[serde(default)]
    pub returns: TypeSpec,
    #[serde(default)]
    pub params: Vec<VarDecl>,
    #[serde(default)]
    pub flags: Vec<FunctionFlag>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnumDecl {
    pub file: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub namespace: Vec<String>,
    pub name: String,
    /// Underlying type, when declared.
    #[serde(default)]
    pub tag: Option<TypeSpec>,
    #[serde(default)]
    pub enumerators: Vec<EnumeratorDecl>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumeratorDecl {
    pub name: String,
    #[serde(default)]
    pub value: Option<ValueSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassDecl {
    pub file: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub namespace: Vec<String>,
    pub name: String,
    /// Declared with the `struct` keyword.
    #[serde(default, rename = "struct")]
    pub is_struct: bool,
    #[serde(default)]
    pub members: Vec<VarDecl>,
    #[serde(default)]
    pub constructors: Vec<MethodDecl>,
    #[serde(default)]
    pub destructor: Option<MethodDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

/// A global constant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableDecl {
    pub file: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub namespace: Vec<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeSpec,
    #[serde(default)]
    pub value: Option<ValueSpec>,
}
