//! The emission interface synthesizers drive.

use repogen_ir::{QualifiedName, Receiver, TypeRef};
use serde::Serialize;

/// The emitted type: its name, the contract it implements and the runtime
/// base it extends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSpec {
    /// Emitted type, in the contract's module.
    pub name: QualifiedName,
    pub contract: QualifiedName,
    pub entity: QualifiedName,
    /// Runtime base type, parameterized by `entity`.
    pub base_type: String,
    /// Modules the contract's file glob-imports, which the emitted file
    /// imports too.
    pub glob_imports: Vec<String>,
}

/// The single constructor of the emitted type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorSpec {
    pub name: String,
    pub context_param: String,
    pub context_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub ty: TypeRef,
    /// Whether the parameter is passed to the query.
    pub bound: bool,
}

/// Signature of one emitted method; reproduces the contract declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSpec {
    pub name: String,
    pub receiver: Receiver,
    pub params: Vec<ParamSpec>,
    pub return_type: TypeRef,
}

/// Leaf values of an emitted expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Operand {
    /// The raw query text, materialized as a constant.
    Query(String),
    /// A string literal.
    Str(String),
    /// A parameter of the enclosing method or constructor.
    Param(String),
    /// The runtime's type constant for `entity`.
    EntityConstant {
        constant: String,
        entity: QualifiedName,
    },
}

/// What an emitted call invokes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Callee {
    /// A constructor of the runtime base type.
    BaseConstructor(String),
    /// A method of the wrapped base instance.
    BaseMethod(String),
    /// A free function or associated function, by path.
    Function(String),
}

/// Receives synthesis operations and produces output.
///
/// Synthesizers call `declare_type` first, then `declare_constructor` once,
/// then `declare_method` once per query method, then `finish`. Expressions
/// passed to a declaration are built with `operand`, `sequence` and
/// `emit_call` just before it.
pub trait CodeSink {
    /// An emitted expression.
    type Expr;
    /// What the finished sink produces.
    type Output;

    fn declare_type(&mut self, spec: &TypeSpec);

    fn operand(&mut self, operand: &Operand) -> Self::Expr;

    /// An ordered sequence of expressions.
    fn sequence(&mut self, items: Vec<Self::Expr>) -> Self::Expr;

    fn emit_call(&mut self, callee: &Callee, args: Vec<Self::Expr>) -> Self::Expr;

    /// Declare the constructor; `base` builds the wrapped base instance.
    fn declare_constructor(&mut self, spec: &ConstructorSpec, base: Self::Expr);

    /// Declare a method whose body evaluates to `body`.
    fn declare_method(&mut self, spec: &MethodSpec, body: Self::Expr);

    fn finish(self) -> Self::Output;
}
