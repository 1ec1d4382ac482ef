//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// A phase in the compilation pipeline.
///
/// Built-in phases:
/// - `ValidatePhase` - runs lints over the manifest declarations
/// - `LowerPhase` - builds the module trees from the declarations
/// - `ProxyPhase` - synthesizes marshaling proxies
pub trait Phase: Send + Sync {
    /// Short name, used in the phase span and plugin hooks.
    fn name(&self) -> &'static str;

    /// One-line summary recorded on the phase span.
    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// Problems with a single declaration are recorded as diagnostics; an
    /// `Err` stops the pipeline.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}
