//! Pipeline orchestrator.

use eyre::Result;
use polyglot_manifest::Manifest;
use tracing::info_span;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{LowerPhase, ProxyPhase, ValidatePhase},
};

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (validate, lower, proxy) followed by any user
/// phases, calling plugin hooks before and after each phase.
///
/// ```ignore
/// let ctx = Pipeline::new().plugin(TracingPlugin::new()).run(manifest)?;
/// let registry = ctx.take_registry()?;
/// ```
pub struct Pipeline {
    builtin: Vec<Box<dyn Phase>>,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            builtin: vec![
                Box::new(ValidatePhase::new()),
                Box::new(LowerPhase),
                Box::new(ProxyPhase::new()),
            ],
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on a manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally. Use [`Pipeline::run_in`]
    /// to keep the diagnostics collected before the failure.
    pub fn run(&self, manifest: Manifest) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(manifest);
        self.run_in(&mut ctx)?;
        Ok(ctx)
    }

    /// Run the pipeline on an existing context.
    pub fn run_in(&self, ctx: &mut CompilationContext) -> Result<()> {
        for phase in self.builtin.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), ctx)?;
        }
        Ok(())
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        let _span = info_span!(
            "phase",
            name = phase_name,
            description = phase.description()
        )
        .entered();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::pipeline::TracingPlugin;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn make_test_manifest() -> Manifest {
        r#"
        [[decl]]
        kind = "function"
        file = "src/example.cpp"
        namespace = ["Foo"]
        name = "greet"
        mangled = "_ZN3Foo5greetENSt7__cxx1112basic_stringIcSt11char_traitsIcESaIcEEE"
        returns = "std::string"
        "#
        .parse()
        .expect("Failed to parse test manifest")
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let mut ctx = Pipeline::new()
            .run(make_test_manifest())
            .expect("pipeline should succeed");

        let registry = ctx.take_registry().unwrap();
        assert!(registry.get("example").unwrap().has_proxies());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin).plugin(TracingPlugin::new());
        let _ = pipeline
            .run(make_test_manifest())
            .expect("pipeline should succeed");

        // 3 built-in phases = 3 before + 3 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 3);
        assert_eq!(after_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_run_in_keeps_diagnostics_on_failure() {
        let manifest: Manifest = r#"
        [[decl]]
        kind = "function"
        file = "a.cpp"
        name = "f"
        mangled = "_Z1fv"

        [[decl]]
        kind = "function"
        file = "b.cpp"
        name = "g"
        mangled = "_Z1fv"
        "#
        .parse()
        .unwrap();
        let mut ctx = CompilationContext::new(manifest);

        assert!(Pipeline::new().run_in(&mut ctx).is_err());
        assert_eq!(ctx.error_count(), 1);
        assert!(ctx.registry.is_none());
    }
}
