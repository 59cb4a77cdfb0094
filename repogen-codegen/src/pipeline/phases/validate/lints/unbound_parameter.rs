//! Lint for query method parameters that never reach the query.

use super::super::{Lint, LintContext};
use crate::{GenerationError, pipeline::Diagnostic};

/// Warns about query method parameters without a bind marker.
///
/// Such parameters are accepted by the generated method but not passed to
/// the runtime.
pub struct UnboundParameterLint;

impl Lint for UnboundParameterLint {
    fn name(&self) -> &'static str {
        "unbound-parameter"
    }

    fn description(&self) -> &'static str {
        "Check that every query method parameter is bound"
    }

    fn check(
        &self,
        ctx: &LintContext<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), GenerationError> {
        for plan in ctx.plans {
            for method in &plan.methods {
                let bindings = &method.descriptor.bindings;
                for (index, param) in method.signature.params.iter().enumerate() {
                    if bindings.iter().any(|b| b.parameter.index == index) {
                        continue;
                    }

                    let mut diagnostic = Diagnostic::warning(
                        "validate",
                        format!(
                            "parameter `{}` of `{}::{}` is not bound to the query",
                            param.name, plan.repository.contract, method.descriptor.name
                        ),
                    )
                    .with_code(self.name());
                    if let Some(origin) = &method.signature.origin {
                        diagnostic = diagnostic.at(origin.to_string());
                    }
                    diagnostics.push(diagnostic);
                }
            }
        }

        Ok(())
    }
}
