//! List operation - the module trees built from the manifest.

use eyre::{Context, Result};
use polyglot_manifest::Manifest;

use super::pipeline;
use crate::reports::ListReport;

/// Execute the list operation.
///
/// Declarations that fail to lower are absent from the trees.
pub fn list(manifest: &Manifest) -> Result<ListReport> {
    let mut ctx = pipeline()
        .run(manifest.clone())
        .wrap_err("Pipeline failed")?;
    let registry = ctx.take_registry()?;
    Ok(ListReport { registry })
}
