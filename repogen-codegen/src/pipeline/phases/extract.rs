//! Extract phase - describes repository contracts.

use eyre::Result;

use crate::{
    analysis::MetadataExtractor,
    pipeline::{CompilationContext, Phase},
};

/// Phase that finds marked contracts and resolves their entity types.
pub struct ExtractPhase;

impl Phase for ExtractPhase {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn description(&self) -> &'static str {
        "Find repository contracts and resolve their entity types"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let extracted = MetadataExtractor::new(&ctx.registry, &ctx.manifest).extract();
        match extracted {
            Ok(repositories) => {
                ctx.repositories = Some(repositories);
                Ok(())
            }
            Err(err) => Err(ctx.fail(self.name(), err)),
        }
    }
}
