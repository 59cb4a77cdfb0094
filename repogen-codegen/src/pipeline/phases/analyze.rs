//! Analyze phase - plans the query methods of every contract.

use eyre::{Result, eyre};
use repogen_ir::{ContractPlan, RepositoryDescriptor};

use crate::{
    GenerationError,
    analysis::ContractAnalyzer,
    pipeline::{CompilationContext, Phase},
};

/// Phase that classifies return shapes and collects bindings.
///
/// Contracts are planned in extraction order, methods in declaration order.
/// The first invalid query method fails the whole phase.
pub struct AnalyzePhase;

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Classify query return shapes and collect parameter bindings"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let repositories = ctx
            .repositories
            .clone()
            .ok_or_else(|| eyre!("repositories not set - did ExtractPhase run?"))?;

        match plan_all(ctx, repositories) {
            Ok(plans) => {
                ctx.plans = Some(plans);
                Ok(())
            }
            Err(err) => Err(ctx.fail(self.name(), err)),
        }
    }
}

fn plan_all(
    ctx: &CompilationContext,
    repositories: Vec<RepositoryDescriptor>,
) -> Result<Vec<ContractPlan>, GenerationError> {
    let analyzer = ContractAnalyzer::new(&ctx.manifest);
    let mut plans = Vec::with_capacity(repositories.len());

    for repository in repositories {
        // Extraction only describes registered declarations.
        let Some(decl) = ctx.registry.get(&repository.contract) else {
            continue;
        };
        plans.push(analyzer.plan(repository, decl)?);
    }

    Ok(plans)
}
