//! Lint for contracts whose emitted files would collide.

use std::collections::HashMap;

use super::super::{Lint, LintContext};
use crate::{GenerationError, pipeline::Diagnostic, synth};

/// Fails when two contracts would be emitted to the same file.
///
/// Emitted files mirror the contract's module, so this only happens for
/// names that differ in case alone, such as `HTTPRepo` and `HttpRepo`.
pub struct DuplicateImplNameLint;

impl Lint for DuplicateImplNameLint {
    fn name(&self) -> &'static str {
        "duplicate-impl-name"
    }

    fn description(&self) -> &'static str {
        "Check that every contract gets its own emitted file"
    }

    fn check(
        &self,
        ctx: &LintContext<'_>,
        _diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), GenerationError> {
        let suffix = &ctx.manifest.codegen.impl_suffix;
        let mut owners = HashMap::new();

        for plan in ctx.plans {
            let contract = &plan.repository.contract;
            let file = synth::module_file(&synth::impl_name(contract, suffix)).join("/");
            if let Some(first) = owners.insert(file.clone(), contract) {
                return Err(GenerationError::DuplicateImplName {
                    file,
                    first: first.to_string(),
                    second: contract.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use repogen_ir::TypeRegistry;
    use repogen_manifest::Manifest;

    use super::*;
    use crate::pipeline::phases::validate::lints::fixtures;

    fn check(contracts: &[&str]) -> Result<(), GenerationError> {
        let manifest = Manifest::new("t");
        let registry = TypeRegistry::new();
        let plans: Vec<_> = contracts
            .iter()
            .map(|c| fixtures::plan(c, Vec::new()))
            .collect();
        let ctx = LintContext {
            manifest: &manifest,
            registry: &registry,
            plans: &plans,
        };
        DuplicateImplNameLint.check(&ctx, &mut Vec::new())
    }

    #[test]
    fn test_distinct_modules_do_not_collide() {
        assert!(check(&["a::UserRepository", "b::UserRepository"]).is_ok());
    }

    #[test]
    fn test_case_only_difference_collides() {
        let err = check(&["repo::HTTPRepo", "repo::HttpRepo"]).unwrap_err();
        match err {
            GenerationError::DuplicateImplName {
                file,
                first,
                second,
            } => {
                assert_eq!(file, "repo/http_repo_impl");
                assert_eq!(first, "repo::HTTPRepo");
                assert_eq!(second, "repo::HttpRepo");
            }
            other => panic!("expected duplicate impl name, got {other:?}"),
        }
    }
}
