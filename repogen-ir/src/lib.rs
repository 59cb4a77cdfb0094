//! Intermediate representation types for repogen.
//!
//! This crate holds the portable type-metadata model that every other
//! repogen crate speaks, plus the descriptors produced by analysis.
//!
//! # Architecture
//!
//! ```text
//! sources → repogen-introspect (TypeDecl) → TypeRegistry
//!         → analysis (RepositoryDescriptor, QueryMethodDescriptor) → ContractPlan
//!         → synthesis
//! ```
//!
//! The model is host-neutral: nothing here knows about `syn` or any other
//! parser, and nothing here knows how code is emitted.

mod decl;
mod descriptor;
mod registry;
mod types;

pub use decl::{
    DeclKind, Import, Marker, MethodDecl, Origin, ParamDecl, Receiver, TypeDecl, expand_imports,
};
pub use descriptor::{
    ContractPlan, EntityType, ParamBinding, ParamRef, PlannedMethod, QualifiedName,
    QueryMethodDescriptor, RepositoryDescriptor, ReturnShape,
};
pub use registry::{TypeRegistry, Unresolved};
pub use types::TypeRef;
