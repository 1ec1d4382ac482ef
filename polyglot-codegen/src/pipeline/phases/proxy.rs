//! Proxy phase - attaches marshaling proxies to the lowered functions.

use eyre::{OptionExt, Result};
use tracing::debug;

use crate::{
    pipeline::{CompilationContext, Phase},
    proxy::{OwnedStringPolicy, ProxyPolicy, apply_proxies},
};

/// Phase that synthesizes a proxy for every function whose signature needs
/// marshaling.
pub struct ProxyPhase {
    policy: Box<dyn ProxyPolicy>,
}

impl ProxyPhase {
    /// Proxy owned strings.
    pub fn new() -> Self {
        Self::with_policy(OwnedStringPolicy)
    }

    pub fn with_policy(policy: impl ProxyPolicy + 'static) -> Self {
        Self {
            policy: Box::new(policy),
        }
    }
}

impl Default for ProxyPhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ProxyPhase {
    fn name(&self) -> &'static str {
        "proxy"
    }

    fn description(&self) -> &'static str {
        "Synthesize marshaling proxies for owned-string signatures"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let registry = ctx
            .registry
            .as_mut()
            .ok_or_eyre("module registry not built; the lower phase has not run")?;

        for ast in registry.modules_mut() {
            let count = apply_proxies(ast, self.policy.as_ref());
            if count > 0 {
                debug!(module = %ast.module_name, proxies = count, "synthesized proxies");
            }
        }
        Ok(())
    }
}
