//! Diagnostic types for the compilation pipeline.
//!
//! Phases record advisory warnings and per-declaration errors here instead
//! of failing outright, so one bad declaration does not hide the others.

use std::fmt;

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The declaration could not be processed.
    Error,
    /// Processing continued, but the result may not be what was intended.
    Warning,
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message from a compilation phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    pub message: String,
    /// Source location of the declaration, e.g. `src/example.cpp:12`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Qualified name of the declaration concerned, e.g. `Foo::greet`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            message: message.into(),
            location: None,
            declaration: None,
        }
    }

    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Name the declaration this diagnostic is about.
    pub fn for_declaration(mut self, name: impl Into<String>) -> Self {
        self.declaration = Some(name.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.phase, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("lower", "unknown type 'size_type' in 'resize'");
        assert!(diag.severity.is_error());
        assert_eq!(diag.phase, "lower");
        assert!(diag.declaration.is_none());
    }

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::warning("lower", "use fixed-width integer types for portability")
            .at("src/example.cpp:12")
            .for_declaration("Foo::greet");
        assert_eq!(diag.location.as_deref(), Some("src/example.cpp:12"));
        assert_eq!(diag.declaration.as_deref(), Some("Foo::greet"));
        assert_eq!(
            diag.to_string(),
            "warning[lower]: use fixed-width integer types for portability (at src/example.cpp:12)"
        );
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
