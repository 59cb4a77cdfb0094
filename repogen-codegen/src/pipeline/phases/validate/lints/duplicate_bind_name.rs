//! Lint for query methods binding the same name twice.

use std::collections::HashSet;

use repogen_manifest::DuplicateBindPolicy;

use super::super::{Lint, LintContext};
use crate::{GenerationError, pipeline::Diagnostic};

/// Reports bind names used more than once in a single query method.
///
/// Severity follows `[codegen] duplicate_bind_names`: `warn` records a
/// warning and generation continues, `deny` aborts with
/// [`GenerationError::DuplicateBindName`], `allow` stays silent.
pub struct DuplicateBindNameLint;

impl Lint for DuplicateBindNameLint {
    fn name(&self) -> &'static str {
        "duplicate-bind-name"
    }

    fn description(&self) -> &'static str {
        "Check that no query method binds the same name twice"
    }

    fn check(
        &self,
        ctx: &LintContext<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), GenerationError> {
        let policy = ctx.manifest.codegen.duplicate_bind_names;
        if policy == DuplicateBindPolicy::Allow {
            return Ok(());
        }

        for plan in ctx.plans {
            for method in &plan.methods {
                let mut seen = HashSet::new();
                let mut reported = HashSet::new();
                for binding in &method.descriptor.bindings {
                    let name = binding.bind_name.as_str();
                    if seen.insert(name) || !reported.insert(name) {
                        continue;
                    }

                    let origin = method
                        .signature
                        .origin
                        .clone()
                        .or_else(|| plan.repository.origin.clone());

                    if policy == DuplicateBindPolicy::Deny {
                        return Err(GenerationError::DuplicateBindName {
                            contract: plan.repository.contract.to_string(),
                            method: method.descriptor.name.clone(),
                            bind_name: name.to_string(),
                            origin,
                        });
                    }

                    let mut diagnostic = Diagnostic::warning(
                        "validate",
                        format!(
                            "`{}::{}` binds `{}` more than once; the runtime decides which value wins",
                            plan.repository.contract, method.descriptor.name, name
                        ),
                    )
                    .with_code(self.name());
                    if let Some(origin) = origin {
                        diagnostic = diagnostic.at(origin.to_string());
                    }
                    diagnostics.push(diagnostic);
                }
            }
        }

        Ok(())
    }
}
