//! Pipeline orchestrator.

use eyre::Result;
use repogen_ir::TypeRegistry;
use repogen_manifest::Manifest;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{AnalyzePhase, ExtractPhase, ValidatePhase},
};

/// The compilation pipeline orchestrator.
///
/// The pipeline manages the execution of compilation phases and plugin hooks.
/// It runs built-in phases (extract, analyze, validate) followed by any user
/// phases, calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(MyPlugin::new())
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(manifest, registry)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with default built-in phases.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Replace the built-in validate phase, e.g. to add lints.
    pub fn validate(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
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

    /// Run the pipeline over every declaration in `registry`.
    ///
    /// Executes all phases in order:
    /// 1. ExtractPhase - describes marked contracts
    /// 2. AnalyzePhase - plans query methods
    /// 3. ValidatePhase - runs lints
    /// 4. User phases (if any)
    ///
    /// Plugin hooks are called before and after each phase.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(&self, manifest: Manifest, registry: TypeRegistry) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(manifest, registry);

        // Built-in phases in execution order
        let builtin_phases: [&dyn Phase; 3] = [&ExtractPhase, &AnalyzePhase, &self.validate];

        for phase in builtin_phases {
            self.run_phase(phase, &mut ctx)?;
        }
        for phase in &self.phases {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        tracing::debug!(phase = phase_name, "{}", phase.description());
        phase.run(ctx)?;
        tracing::debug!(
            phase = phase_name,
            diagnostics = ctx.diagnostics.len(),
            "phase finished"
        );

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
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use repogen_ir::{Marker, MethodDecl, TypeDecl, TypeRef};

    use super::*;
    use crate::{GenerationError, analysis::build_registry};

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

    #[derive(Default)]
    struct PhaseLog(Mutex<Vec<String>>);

    impl Plugin for PhaseLog {
        fn name(&self) -> &'static str {
            "phase-log"
        }

        fn on_before_phase(&self, phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.0.lock().unwrap().push(phase.to_string());
            Ok(())
        }
    }

    fn registry() -> TypeRegistry {
        build_registry(
            &Manifest::new("test"),
            vec![
                TypeDecl::concrete("User").in_module("model"),
                TypeDecl::interface("UserRepository")
                    .in_module("repo")
                    .marker(Marker::flag("repository"))
                    .extends(TypeRef::generic("Repository", vec![TypeRef::named("User")]))
                    .method(
                        MethodDecl::new("find_all")
                            .marker(Marker::with_value("query", "from User"))
                            .returns(TypeRef::generic(
                                "Uni",
                                vec![TypeRef::generic("Vec", vec![TypeRef::named("User")])],
                            )),
                    ),
            ],
        )
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let ctx = Pipeline::new()
            .run(Manifest::new("test"), registry())
            .expect("pipeline should succeed");

        assert_eq!(ctx.repositories.as_ref().map(Vec::len), Some(1));
        let plans = ctx.plans.as_ref().unwrap();
        assert_eq!(plans[0].methods.len(), 1);
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline
            .run(Manifest::new("test"), registry())
            .expect("pipeline should succeed");

        // 3 built-in phases = 3 before + 3 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 3);
        assert_eq!(after_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_pipeline_phase_order() {
        struct Noop;
        impl Phase for Noop {
            fn name(&self) -> &'static str {
                "noop"
            }
            fn description(&self) -> &'static str {
                "Does nothing"
            }
            fn run(&self, _ctx: &mut CompilationContext) -> Result<()> {
                Ok(())
            }
        }

        let log = Arc::new(PhaseLog::default());
        Pipeline::new()
            .phase(Noop)
            .plugin(log.clone())
            .run(Manifest::new("test"), registry())
            .unwrap();

        assert_eq!(
            *log.0.lock().unwrap(),
            vec!["extract", "analyze", "validate", "noop"]
        );
    }

    #[test]
    fn test_pipeline_stops_at_fatal_error() {
        let registry = build_registry(
            &Manifest::new("test"),
            vec![TypeDecl::concrete("Broken").marker(Marker::flag("repository"))],
        );
        let log = Arc::new(PhaseLog::default());

        let report = Pipeline::new()
            .plugin(log.clone())
            .run(Manifest::new("test"), registry)
            .unwrap_err();

        let err = report.downcast_ref::<GenerationError>().unwrap();
        assert_eq!(err.kind(), "not-an-interface");
        assert_eq!(*log.0.lock().unwrap(), vec!["extract"]);
    }
}
