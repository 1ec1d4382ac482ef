//! Lower phase - builds module trees from the manifest declarations.

mod builder;
mod types;
mod values;

pub use builder::AstBuilder;
use eyre::Result;
use tracing::{debug, warn};

use crate::pipeline::{CompilationContext, Diagnostic, Phase};

/// Phase that turns manifest declarations into the module registry.
///
/// A declaration that cannot be built is recorded as an error diagnostic
/// and skipped; the rest of its module is still built.
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Resolve types and values and build the module trees"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut builder = AstBuilder::new(ctx.manifest.source.language);
        let mut skipped = 0;

        for decl in &ctx.manifest.declarations {
            let result = builder.add(decl);
            ctx.diagnostics.extend(builder.take_warnings());
            if let Err(err) = result {
                warn!(declaration = %decl.qualified_name(), "{}", err);
                ctx.diagnostics.push(
                    Diagnostic::error(self.name(), err.to_string())
                        .at(decl.location())
                        .for_declaration(decl.qualified_name()),
                );
                skipped += 1;
            }
        }

        let registry = builder.finish();
        debug!(
            modules = registry.len(),
            declarations = ctx.manifest.declarations.len() - skipped,
            skipped,
            "lowered declarations"
        );
        ctx.registry = Some(registry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use polyglot_manifest::Manifest;

    use super::*;

    #[test]
    fn test_errors_are_per_declaration() {
        let manifest: Manifest = r#"
            [[decl]]
            kind = "function"
            file = "src/m.cpp"
            line = 3
            name = "bad"
            mangled = "_Z3badv"
            returns = "QString"

            [[decl]]
            kind = "function"
            file = "src/m.cpp"
            name = "good"
            mangled = "_Z4goodv"
            returns = "long"
        "#
        .parse()
        .unwrap();
        let mut ctx = CompilationContext::new(manifest);

        LowerPhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
        let error = ctx.errors().next().unwrap();
        assert_eq!(error.message, "unknown type 'QString' in 'bad'");
        assert_eq!(error.location.as_deref(), Some("src/m.cpp:3"));

        let registry = ctx.take_registry().unwrap();
        assert_eq!(registry.get("m").unwrap().declaration_count(), 1);
    }
}
