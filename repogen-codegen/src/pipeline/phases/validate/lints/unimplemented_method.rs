//! Lint for contract methods the emitted type cannot implement.

use super::super::{Lint, LintContext};
use crate::{GenerationError, pipeline::Diagnostic};

/// Fails on a contract method with neither a query marker nor a default
/// body: the emitted type would not compile.
pub struct UnimplementedMethodLint;

impl Lint for UnimplementedMethodLint {
    fn name(&self) -> &'static str {
        "unimplemented-method"
    }

    fn description(&self) -> &'static str {
        "Check that every contract method is a query or has a default body"
    }

    fn check(
        &self,
        ctx: &LintContext<'_>,
        _diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), GenerationError> {
        let query_marker = &ctx.manifest.markers.query;

        for plan in ctx.plans {
            let Some(decl) = ctx.registry.get(&plan.repository.contract) else {
                continue;
            };
            let unimplemented = decl
                .methods
                .iter()
                .find(|m| !m.has_default_body && m.find_marker(query_marker).is_none());

            if let Some(method) = unimplemented {
                return Err(GenerationError::UnimplementedMethod {
                    contract: plan.repository.contract.to_string(),
                    method: method.name.clone(),
                    origin: method.origin.clone().or_else(|| decl.origin.clone()),
                });
            }
        }

        Ok(())
    }
}
