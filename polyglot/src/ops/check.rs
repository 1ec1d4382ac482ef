//! Check operation - manifest validation.

use std::path::Path;

use polyglot_codegen::pipeline::{CompilationContext, Severity};
use polyglot_manifest::Manifest;

use super::{describe, pipeline};
use crate::reports::{CheckReport, ModuleStats};

/// Execute the check operation.
///
/// Runs every phase, proxy synthesis included, and returns the diagnostics.
/// A phase that fails outright is reported as an error rather than
/// returned, so diagnostics recorded before the failure are kept.
pub fn check(manifest: &Manifest, config_path: &Path) -> CheckReport {
    let mut ctx = CompilationContext::new(manifest.clone());
    let outcome = pipeline().run_in(&mut ctx);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();
    for diag in &ctx.diagnostics {
        let msg = describe(diag);
        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }
    if let Err(err) = outcome
        && errors.is_empty()
    {
        errors.push(format!("{:#}", err));
    }

    let modules = ctx
        .registry
        .as_ref()
        .map(|registry| registry.modules().map(ModuleStats::of).collect())
        .unwrap_or_default();

    CheckReport {
        config_path: config_path.to_path_buf(),
        errors,
        warnings,
        infos,
        modules,
    }
}
