//! Validate phase - runs lints on the manifest declarations.
//!
//! Structural checks (identifiers, required fields) already happen when the
//! manifest is parsed. The lints here look across declarations.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::Lint;
pub use lints::{DuplicateSymbolLint, EmptyEnumLint, OverloadedFunctionLint};
use tracing::debug;

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the manifest using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with the built-in lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(DuplicateSymbolLint),
                Box::new(OverloadedFunctionLint),
                Box::new(EmptyEnumLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check declarations for conflicts and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        for lint in &self.lints {
            debug!(lint = lint.name(), "{}", lint.description());
            lint.check(&ctx.manifest, &mut ctx.diagnostics);
        }

        // Warnings are allowed
        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use polyglot_manifest::Manifest;

    use super::*;
    use crate::pipeline::Diagnostic;

    fn make_test_manifest() -> Manifest {
        r#"
        [[decl]]
        kind = "enum"
        file = "shapes.cpp"
        name = "Kind"
        "#
        .parse()
        .unwrap()
    }

    #[test]
    fn test_with_errors() {
        struct AlwaysErrorLint;
        impl Lint for AlwaysErrorLint {
            fn name(&self) -> &'static str {
                "always-error"
            }
            fn description(&self) -> &'static str {
                "Always produces an error"
            }
            fn check(&self, _manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
                diagnostics.push(Diagnostic::error("test", "forced error"));
            }
        }

        let mut ctx = CompilationContext::new(make_test_manifest());

        let phase = ValidatePhase::empty().with_lint(AlwaysErrorLint);
        let result = phase.run(&mut ctx);

        assert!(result.is_err());
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_warnings_allowed() {
        let mut ctx = CompilationContext::new(make_test_manifest());

        let result = ValidatePhase::new().run(&mut ctx);

        assert!(result.is_ok());
        assert!(ctx.has_warnings());
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_lint_order() {
        let phase = ValidatePhase::new();
        let names: Vec<_> = phase.lints.iter().map(|lint| lint.name()).collect();
        assert_eq!(
            names,
            vec!["duplicate-symbol", "overloaded-function", "empty-enum"]
        );
    }
}
