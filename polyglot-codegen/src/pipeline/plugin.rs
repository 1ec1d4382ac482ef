//! Pipeline plugin trait for extensibility.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::Instant,
};

use eyre::Result;
use tracing::debug;

use super::CompilationContext;

/// A plugin that can hook into the compilation pipeline.
///
/// Plugins receive callbacks before and after each phase runs, allowing
/// them to inspect or modify the compilation context.
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully. Return an error to
    /// abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}

/// Logs phase timings and diagnostic counts at debug level.
#[derive(Debug, Default)]
pub struct TracingPlugin {
    started: Mutex<HashMap<String, Instant>>,
}

impl TracingPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for TracingPlugin {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_before_phase(&self, phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
        if let Ok(mut started) = self.started.lock() {
            started.insert(phase.to_string(), Instant::now());
        }
        debug!(phase, "phase started");
        Ok(())
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let elapsed = self
            .started
            .lock()
            .ok()
            .and_then(|mut started| started.remove(phase))
            .map(|start| start.elapsed());
        debug!(
            phase,
            ?elapsed,
            errors = ctx.error_count(),
            warnings = ctx.warning_count(),
            "phase finished"
        );
        Ok(())
    }
}
