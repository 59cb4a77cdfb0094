//! Return shape classification.

use std::fmt;

use repogen_ir::{ReturnShape, TypeRef};

/// Why a return type is not a valid query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeMismatch {
    /// The method returns nothing.
    Missing,
    /// The outer type is not the monad.
    NotMonad,
    /// The monad does not carry exactly one argument.
    MonadArity(usize),
    /// The monad argument is parameterized but is not the list container.
    NotList,
    /// The list container does not carry exactly one argument.
    ListArity(usize),
    /// The list element is itself parameterized.
    TooDeep,
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeMismatch::Missing => write!(f, "query methods must return a value"),
            ShapeMismatch::NotMonad => write!(f, "the result is not wrapped in the async monad"),
            ShapeMismatch::MonadArity(n) => {
                write!(f, "the monad takes exactly one type argument, found {}", n)
            }
            ShapeMismatch::NotList => {
                write!(f, "the monad argument is neither an entity nor a list")
            }
            ShapeMismatch::ListArity(n) => {
                write!(f, "the list takes exactly one type argument, found {}", n)
            }
            ShapeMismatch::TooDeep => write!(f, "list elements must not be parameterized"),
        }
    }
}

/// Decides whether a query returns one result or many.
///
/// Only the generic structure is inspected: the entity inside the monad or
/// the list is not checked against the contract's entity.
pub struct ReturnShapeClassifier<'a> {
    monad: &'a str,
    list: &'a str,
}

impl<'a> ReturnShapeClassifier<'a> {
    pub fn new(monad: &'a str, list: &'a str) -> Self {
        Self { monad, list }
    }

    /// `Monad<X>` is single, `Monad<List<X>>` is a list, where `X` carries
    /// no type arguments. Anything else is a mismatch.
    pub fn classify(&self, return_type: Option<&TypeRef>) -> Result<ReturnShape, ShapeMismatch> {
        let outer = return_type.ok_or(ShapeMismatch::Missing)?;
        if !outer.is_named(self.monad) {
            return Err(ShapeMismatch::NotMonad);
        }

        let inner = match outer.args() {
            [inner] => inner,
            args => return Err(ShapeMismatch::MonadArity(args.len())),
        };
        if !inner.is_parameterized() {
            return Ok(ReturnShape::Single);
        }
        if !inner.is_named(self.list) {
            return Err(ShapeMismatch::NotList);
        }

        match inner.args() {
            [element] if element.is_parameterized() => Err(ShapeMismatch::TooDeep),
            [_] => Ok(ReturnShape::List),
            args => Err(ShapeMismatch::ListArity(args.len())),
        }
    }
}
