//! Compilation context passed through pipeline phases.

use eyre::{OptionExt, Result};
use polyglot_ir::ModuleRegistry;
use polyglot_manifest::Manifest;

use super::diagnostic::{Diagnostic, Severity};

/// State of one compilation, accumulated phase by phase.
#[derive(Debug)]
pub struct CompilationContext {
    /// The manifest being compiled.
    pub manifest: Manifest,
    /// Module trees built from the declarations (populated by LowerPhase).
    pub registry: Option<ModuleRegistry>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            registry: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the module registry out of the context.
    ///
    /// Fails when LowerPhase has not run.
    pub fn take_registry(&mut self) -> Result<ModuleRegistry> {
        self.registry
            .take()
            .ok_or_eyre("module registry not built; the lower phase has not run")
    }
}
