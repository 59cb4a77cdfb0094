//! Lint trait for plan validation.

use repogen_ir::{ContractPlan, TypeRegistry};
use repogen_manifest::Manifest;

use crate::{GenerationError, pipeline::Diagnostic};

/// What a lint can see: configuration, declarations and the finished plans.
#[derive(Debug, Clone, Copy)]
pub struct LintContext<'a> {
    pub manifest: &'a Manifest,
    pub registry: &'a TypeRegistry,
    pub plans: &'a [ContractPlan],
}

/// A lint that checks contract plans for issues.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// A human-readable description of what this lint checks.
    fn description(&self) -> &'static str;

    /// Check the plans and add any diagnostics.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] for findings that abort generation.
    fn check(
        &self,
        ctx: &LintContext<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), GenerationError>;
}
