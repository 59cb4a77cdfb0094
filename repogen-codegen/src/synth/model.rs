//! A sink that records synthesis as data.

use repogen_ir::QualifiedName;
use serde::Serialize;

use super::{Callee, CodeSink, ConstructorSpec, MethodSpec, Operand, TypeSpec};

/// An emitted expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelExpr {
    Operand { operand: Operand },
    Sequence { items: Vec<ModelExpr> },
    Call { callee: Callee, args: Vec<ModelExpr> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedConstructor {
    pub spec: ConstructorSpec,
    pub base: ModelExpr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedMethod {
    pub spec: MethodSpec,
    pub body: ModelExpr,
}

/// Everything synthesized for one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedType {
    pub spec: TypeSpec,
    pub constructor: Option<EmittedConstructor>,
    pub methods: Vec<EmittedMethod>,
}

impl EmittedType {
    pub fn name(&self) -> &QualifiedName {
        &self.spec.name
    }

    pub fn method(&self, name: &str) -> Option<&EmittedMethod> {
        self.methods.iter().find(|m| m.spec.name == name)
    }
}

/// Builds an [`EmittedType`].
#[derive(Debug, Default)]
pub struct ModelSink {
    spec: Option<TypeSpec>,
    constructor: Option<EmittedConstructor>,
    methods: Vec<EmittedMethod>,
}

impl ModelSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CodeSink for ModelSink {
    type Expr = ModelExpr;
    /// `None` when no type was declared.
    type Output = Option<EmittedType>;

    fn declare_type(&mut self, spec: &TypeSpec) {
        self.spec = Some(spec.clone());
    }

    fn operand(&mut self, operand: &Operand) -> ModelExpr {
        ModelExpr::Operand {
            operand: operand.clone(),
        }
    }

    fn sequence(&mut self, items: Vec<ModelExpr>) -> ModelExpr {
        ModelExpr::Sequence { items }
    }

    fn emit_call(&mut self, callee: &Callee, args: Vec<ModelExpr>) -> ModelExpr {
        ModelExpr::Call {
            callee: callee.clone(),
            args,
        }
    }

    fn declare_constructor(&mut self, spec: &ConstructorSpec, base: ModelExpr) {
        self.constructor = Some(EmittedConstructor {
            spec: spec.clone(),
            base,
        });
    }

    fn declare_method(&mut self, spec: &MethodSpec, body: ModelExpr) {
        self.methods.push(EmittedMethod {
            spec: spec.clone(),
            body,
        });
    }

    fn finish(self) -> Option<EmittedType> {
        Some(EmittedType {
            spec: self.spec?,
            constructor: self.constructor,
            methods: self.methods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_without_type() {
        assert!(ModelSink::new().finish().is_none());
    }

    #[test]
    fn test_records_calls() {
        let mut sink = ModelSink::new();
        let arg = sink.operand(&Operand::Str("id".into()));
        let call = sink.emit_call(&Callee::Function("Param::of".into()), vec![arg]);

        assert_eq!(
            call,
            ModelExpr::Call {
                callee: Callee::Function("Param::of".into()),
                args: vec![ModelExpr::Operand {
                    operand: Operand::Str("id".into())
                }],
            }
        );
    }
}
