//! Emitted type synthesis.

use repogen_ir::{ContractPlan, TypeRegistry};
use repogen_manifest::Manifest;

use super::{
    Callee, CodeSink, ConstructorSpec, MethodSynthesizer, Operand, TypeQualifier, TypeSpec,
    impl_name,
};

/// Emits the implementation of one contract into a [`CodeSink`].
///
/// Plans come out of the analyze phase already validated, so synthesis
/// cannot fail.
pub struct ClassSynthesizer<'a> {
    manifest: &'a Manifest,
    registry: &'a TypeRegistry,
}

impl<'a> ClassSynthesizer<'a> {
    pub fn new(manifest: &'a Manifest, registry: &'a TypeRegistry) -> Self {
        Self { manifest, registry }
    }

    pub fn synthesize<S: CodeSink>(&self, plan: &ContractPlan, mut sink: S) -> S::Output {
        let runtime = &self.manifest.runtime;
        let repository = &plan.repository;
        let entity = &repository.entity.name;

        let name = impl_name(&repository.contract, &self.manifest.codegen.impl_suffix);
        tracing::trace!(contract = %repository.contract, emitted = %name, "synthesizing");

        let imports = self
            .registry
            .get(&repository.contract)
            .map_or(&[][..], |decl| decl.imports.as_slice());
        let types = TypeQualifier::new(
            self.registry,
            &repository.contract.module_path,
            imports,
            entity,
            &self.manifest.codegen.crate_root,
        );

        sink.declare_type(&TypeSpec {
            name,
            contract: repository.contract.clone(),
            entity: entity.clone(),
            base_type: runtime.base_type.clone(),
            glob_imports: types.glob_imports(),
        });

        let constructor = ConstructorSpec {
            name: "new".to_string(),
            context_param: "context".to_string(),
            context_type: runtime.context_type.clone(),
        };
        let context = sink.operand(&Operand::Param(constructor.context_param.clone()));
        let entity_constant = sink.operand(&Operand::EntityConstant {
            constant: runtime.entity_constant.clone(),
            entity: entity.clone(),
        });
        let base = sink.emit_call(
            &Callee::BaseConstructor(runtime.constructor.clone()),
            vec![context, entity_constant],
        );
        sink.declare_constructor(&constructor, base);

        let methods = MethodSynthesizer::new(runtime, types);
        for method in &plan.methods {
            methods.synthesize(method, &mut sink);
        }

        sink.finish()
    }
}
