//! Fatal generation errors.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

use miette::Diagnostic;
use repogen_ir::Origin;
use thiserror::Error;

/// A condition that aborts generation for the whole build.
///
/// Phases return these wrapped in [`eyre::Report`]; recover the typed value
/// with `report.downcast_ref::<GenerationError>()`.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum GenerationError {
    #[error("`{contract}` is marked as a repository but is not a trait{}", located(.origin))]
    #[diagnostic(
        code(repogen::not_an_interface),
        help("only traits can be repository contracts; move the marker to a trait")
    )]
    NotAnInterface {
        contract: String,
        origin: Option<Origin>,
    },

    #[error("cannot resolve the entity type of `{contract}`: {reason}{}", located(.origin))]
    #[diagnostic(
        code(repogen::unresolvable_entity_type),
        help(
            "extend the base contract with exactly one concrete entity, e.g. `trait {contract}: Repository<User>`, or list the entity under [runtime] entities"
        )
    )]
    UnresolvableEntityType {
        contract: String,
        reason: String,
        origin: Option<Origin>,
    },

    #[error("`{contract}::{method}` has a query and a default body{}", located(.origin))]
    #[diagnostic(
        code(repogen::conflicting_default_implementation),
        help("remove the body or the query marker; a query method is implemented by the generated type")
    )]
    ConflictingDefaultImplementation {
        contract: String,
        method: String,
        origin: Option<Origin>,
    },

    #[error("`{contract}::{method}` returns `{found}`: {reason}{}", located(.origin))]
    #[diagnostic(
        code(repogen::invalid_return_shape),
        help("query methods must return `Monad<Entity>` or `Monad<List<Entity>>`")
    )]
    InvalidReturnShape {
        contract: String,
        method: String,
        found: String,
        reason: String,
        origin: Option<Origin>,
    },

    #[error("`{contract}::{method}` has a query but no `self` receiver{}", located(.origin))]
    #[diagnostic(
        code(repogen::missing_receiver),
        help("query methods dispatch through the repository; take `&self`")
    )]
    MissingReceiver {
        contract: String,
        method: String,
        origin: Option<Origin>,
    },

    #[error("`{contract}::{method}` has an unsupported signature: {reason}{}", located(.origin))]
    #[diagnostic(
        code(repogen::unsupported_signature),
        help("query methods take concrete parameter types; drop the generics or give the method a default body without a query")
    )]
    UnsupportedSignature {
        contract: String,
        method: String,
        reason: String,
        origin: Option<Origin>,
    },

    #[error("`{contract}::{method}` has a query marker without query text{}", located(.origin))]
    #[diagnostic(code(repogen::missing_query))]
    MissingQuery {
        contract: String,
        method: String,
        origin: Option<Origin>,
    },

    #[error("`{contract}::{method}` binds `{bind_name}` more than once{}", located(.origin))]
    #[diagnostic(
        code(repogen::duplicate_bind_name),
        help("rename one binding, or set [codegen] duplicate_bind_names = \"warn\"")
    )]
    DuplicateBindName {
        contract: String,
        method: String,
        bind_name: String,
        origin: Option<Origin>,
    },

    #[error("`{first}` and `{second}` would both generate `{file}`")]
    #[diagnostic(
        code(repogen::duplicate_impl_name),
        help("rename one of the contracts")
    )]
    DuplicateImplName {
        file: String,
        first: String,
        second: String,
    },

    #[error("`{contract}::{method}` has neither a query nor a default body{}", located(.origin))]
    #[diagnostic(
        code(repogen::unimplemented_method),
        help("add a query marker or a default body; the generated type only implements query methods")
    )]
    UnimplementedMethod {
        contract: String,
        method: String,
        origin: Option<Origin>,
    },
}

impl GenerationError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::NotAnInterface { .. } => "not-an-interface",
            GenerationError::UnresolvableEntityType { .. } => "unresolvable-entity-type",
            GenerationError::ConflictingDefaultImplementation { .. } => {
                "conflicting-default-implementation"
            }
            GenerationError::InvalidReturnShape { .. } => "invalid-return-shape",
            GenerationError::MissingReceiver { .. } => "missing-receiver",
            GenerationError::UnsupportedSignature { .. } => "unsupported-signature",
            GenerationError::MissingQuery { .. } => "missing-query",
            GenerationError::DuplicateBindName { .. } => "duplicate-bind-name",
            GenerationError::DuplicateImplName { .. } => "duplicate-impl-name",
            GenerationError::UnimplementedMethod { .. } => "unimplemented-method",
        }
    }

    /// Source position the error points at, if known.
    pub fn origin(&self) -> Option<&Origin> {
        match self {
            GenerationError::NotAnInterface { origin, .. }
            | GenerationError::UnresolvableEntityType { origin, .. }
            | GenerationError::ConflictingDefaultImplementation { origin, .. }
            | GenerationError::InvalidReturnShape { origin, .. }
            | GenerationError::MissingReceiver { origin, .. }
            | GenerationError::UnsupportedSignature { origin, .. }
            | GenerationError::MissingQuery { origin, .. }
            | GenerationError::DuplicateBindName { origin, .. }
            | GenerationError::UnimplementedMethod { origin, .. } => origin.as_ref(),
            GenerationError::DuplicateImplName { .. } => None,
        }
    }
}

fn located(origin: &Option<Origin>) -> String {
    match origin {
        Some(origin) => format!(" (at {})", origin),
        None => String::new(),
    }
}
