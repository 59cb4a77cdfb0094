//! Validate phase - runs lints on the contract plans.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::{Lint, LintContext};
pub use lints::{
    DuplicateBindNameLint, DuplicateImplNameLint, UnboundParameterLint, UnimplementedMethodLint,
};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the plans using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(UnimplementedMethodLint),
                Box::new(DuplicateImplNameLint),
                Box::new(DuplicateBindNameLint),
                Box::new(UnboundParameterLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check contract plans and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let lint_ctx = LintContext {
            manifest: &ctx.manifest,
            registry: &ctx.registry,
            plans: ctx.plans.as_deref().unwrap_or_default(),
        };

        // A fatal lint stops the remaining ones
        let checked = self
            .lints
            .iter()
            .try_for_each(|lint| {
                tracing::trace!(lint = lint.name(), "{}", lint.description());
                lint.check(&lint_ctx, &mut ctx.diagnostics)
            });
        if let Err(err) = checked {
            return Err(ctx.fail(self.name(), err));
        }

        // Fail if there are any errors (warnings are allowed)
        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use repogen_ir::{Marker, MethodDecl, ParamDecl, TypeDecl, TypeRef, TypeRegistry};
    use repogen_manifest::{DuplicateBindPolicy, Manifest};

    use super::*;
    use crate::{
        GenerationError,
        pipeline::{
            Diagnostic,
            phases::{AnalyzePhase, ExtractPhase},
        },
    };

    fn analyzed(manifest: Manifest, methods: Vec<MethodDecl>) -> CompilationContext {
        let mut contract = TypeDecl::interface("UserRepository")
            .marker(Marker::flag("repository"))
            .extends(TypeRef::generic("Repository", vec![TypeRef::named("User")]));
        contract.methods = methods;
        let registry: TypeRegistry = vec![TypeDecl::concrete("User"), contract]
            .into_iter()
            .collect();

        let mut ctx = CompilationContext::new(manifest, registry);
        ExtractPhase.run(&mut ctx).unwrap();
        AnalyzePhase.run(&mut ctx).unwrap();
        ctx
    }

    fn find_by_name_twice() -> MethodDecl {
        let bound = |name: &str| {
            ParamDecl::new(name, TypeRef::named("String")).marker(Marker::with_value("bind", "name"))
        };
        MethodDecl::new("find")
            .marker(Marker::with_value("query", "from User"))
            .param(bound("first"))
            .param(bound("second"))
            .returns(TypeRef::generic("Uni", vec![TypeRef::named("User")]))
    }

    #[test]
    fn test_with_errors() {
        struct AlwaysErrorLint;
        impl Lint for AlwaysErrorLint {
            fn name(&self) -> &'static str {
                "always-error"
            }
            fn description(&self) -> &'static str {
                "Always produces an error"
            }
            fn check(
                &self,
                _ctx: &LintContext<'_>,
                diagnostics: &mut Vec<Diagnostic>,
            ) -> Result<(), GenerationError> {
                diagnostics.push(Diagnostic::error("test", "forced error"));
                Ok(())
            }
        }

        let mut ctx = analyzed(Manifest::new("t"), Vec::new());

        let phase = ValidatePhase::empty().with_lint(AlwaysErrorLint);
        let result = phase.run(&mut ctx);

        assert!(result.is_err());
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_warnings_allowed() {
        let mut ctx = analyzed(Manifest::new("t"), vec![find_by_name_twice()]);

        let result = ValidatePhase::new().run(&mut ctx);

        assert!(result.is_ok());
        assert_eq!(ctx.warnings().count(), 1);
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_fatal_lint_is_typed() {
        let mut manifest = Manifest::new("t");
        manifest.codegen.duplicate_bind_names = DuplicateBindPolicy::Deny;
        let mut ctx = analyzed(manifest, vec![find_by_name_twice()]);

        let report = ValidatePhase::new().run(&mut ctx).unwrap_err();

        assert_eq!(
            report.downcast_ref::<GenerationError>().map(|e| e.kind()),
            Some("duplicate-bind-name")
        );
        assert_eq!(ctx.error_count(), 1);
    }

    #[test]
    fn test_default_lints() {
        assert_eq!(
            ValidatePhase::new().lint_names(),
            vec![
                "unimplemented-method",
                "duplicate-impl-name",
                "duplicate-bind-name",
                "unbound-parameter"
            ]
        );
    }
}
