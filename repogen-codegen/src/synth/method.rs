//! Method body synthesis.

use repogen_ir::{PlannedMethod, Receiver, ReturnShape, TypeRef};
use repogen_manifest::RuntimeConfig;

use super::{Callee, CodeSink, MethodSpec, Operand, ParamSpec, TypeQualifier};

/// The runtime operation a query of the given shape dispatches to.
pub fn dispatch_for(shape: ReturnShape, runtime: &RuntimeConfig) -> &str {
    match shape {
        ReturnShape::Single => &runtime.select,
        ReturnShape::List => &runtime.select_multiple,
    }
}

/// Emits one query method: the query constant, the ordered bindings and
/// the dispatch call whose result is returned unchanged.
pub struct MethodSynthesizer<'a> {
    runtime: &'a RuntimeConfig,
    types: TypeQualifier<'a>,
}

impl<'a> MethodSynthesizer<'a> {
    pub fn new(runtime: &'a RuntimeConfig, types: TypeQualifier<'a>) -> Self {
        Self { runtime, types }
    }

    pub fn synthesize<S: CodeSink>(&self, method: &PlannedMethod, sink: &mut S) {
        let descriptor = &method.descriptor;

        let query = sink.operand(&Operand::Query(descriptor.query.clone()));

        let binding = Callee::Function(self.runtime.binding.clone());
        let bindings: Vec<S::Expr> = descriptor
            .bindings
            .iter()
            .map(|b| {
                let name = sink.operand(&Operand::Str(b.bind_name.clone()));
                let value = sink.operand(&Operand::Param(b.parameter.name.clone()));
                sink.emit_call(&binding, vec![name, value])
            })
            .collect();
        let bindings = sink.sequence(bindings);

        let dispatch = Callee::BaseMethod(dispatch_for(descriptor.shape, self.runtime).to_string());
        let body = sink.emit_call(&dispatch, vec![query, bindings]);

        sink.declare_method(&self.signature(method), body);
    }

    /// The declared signature, with types rewritten for the emitted file.
    pub fn signature(&self, method: &PlannedMethod) -> MethodSpec {
        let decl = &method.signature;
        let bindings = &method.descriptor.bindings;

        let params = decl
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| ParamSpec {
                name: param.name.clone(),
                ty: self.types.qualify(&param.ty),
                bound: bindings.iter().any(|b| b.parameter.index == index),
            })
            .collect();

        MethodSpec {
            name: decl.name.clone(),
            receiver: match &decl.receiver {
                Some(Receiver::Typed(ty)) => Receiver::Typed(self.types.qualify(ty)),
                Some(receiver) => receiver.clone(),
                None => Receiver::Ref,
            },
            params,
            return_type: decl
                .return_type
                .as_ref()
                .map(|ty| self.types.qualify(ty))
                .unwrap_or_else(|| TypeRef::Tuple { items: Vec::new() }),
        }
    }
}
