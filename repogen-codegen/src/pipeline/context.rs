//! Compilation context passed through pipeline phases.

use eyre::{Report, Result, eyre};
use repogen_ir::{ContractPlan, RepositoryDescriptor, TypeRegistry};
use repogen_manifest::Manifest;

use super::diagnostic::{Diagnostic, Severity};
use crate::GenerationError;

/// Context passed through all pipeline phases.
///
/// This struct carries the state of compilation through each phase,
/// accumulating results and diagnostics along the way.
#[derive(Debug)]
pub struct CompilationContext {
    /// The configuration being compiled against.
    pub manifest: Manifest,
    /// Every declaration visible to the build.
    pub registry: TypeRegistry,
    /// Described repository contracts (populated by ExtractPhase).
    pub repositories: Option<Vec<RepositoryDescriptor>>,
    /// Validated per-contract plans (populated by AnalyzePhase).
    pub plans: Option<Vec<ContractPlan>>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a new compilation context.
    pub fn new(manifest: Manifest, registry: TypeRegistry) -> Self {
        Self {
            manifest,
            registry,
            repositories: None,
            plans: None,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Record a fatal error and turn it into the report the phase returns.
    pub fn fail(&mut self, phase: &str, error: GenerationError) -> Report {
        self.diagnostics.push(Diagnostic::from_error(phase, &error));
        Report::new(error)
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the plans out of the context.
    ///
    /// # Errors
    ///
    /// Fails if AnalyzePhase hasn't run.
    pub fn take_plans(&mut self) -> Result<Vec<ContractPlan>> {
        self.plans
            .take()
            .ok_or_else(|| eyre!("contract plans not set - did AnalyzePhase run?"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_context() -> CompilationContext {
        CompilationContext::new(Manifest::new("test"), TypeRegistry::new())
    }

    #[test]
    fn test_context_creation() {
        let ctx = make_context();

        assert!(ctx.repositories.is_none());
        assert!(ctx.plans.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = make_context();

        ctx.add_diagnostic(Diagnostic::error("test", "test error"));
        ctx.add_diagnostic(Diagnostic::warning("test", "test warning"));

        assert!(ctx.has_errors());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warnings().count(), 1);
    }

    #[test]
    fn test_context_no_errors() {
        let mut ctx = make_context();

        ctx.add_diagnostic(Diagnostic::warning("test", "just a warning"));

        assert!(!ctx.has_errors());
        assert_eq!(ctx.warnings().count(), 1);
    }

    #[test]
    fn test_fail_records_diagnostic() {
        let mut ctx = make_context();

        let report = ctx.fail(
            "analyze",
            GenerationError::MissingReceiver {
                contract: "C".into(),
                method: "m".into(),
                origin: None,
            },
        );

        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.diagnostics[0].phase, "analyze");
        assert!(report.downcast_ref::<GenerationError>().is_some());
    }

    #[test]
    fn test_take_plans_before_analyze() {
        let mut ctx = make_context();
        assert!(ctx.take_plans().is_err());

        ctx.plans = Some(Vec::new());
        assert!(ctx.take_plans().unwrap().is_empty());
        assert!(ctx.plans.is_none());
    }
}
