//! Analysis of repository contracts.
//!
//! - [`MetadataExtractor`] finds marked contracts and resolves their entity
//! - [`ReturnShapeClassifier`] classifies query method return types
//! - [`ParameterBinder`] collects the bound parameters of a query method
//! - [`ContractAnalyzer`] runs the last two over every query method of a
//!   contract and produces its [`ContractPlan`](repogen_ir::ContractPlan)

mod bind;
mod classify;
mod extract;
mod plan;

pub use bind::ParameterBinder;
pub use classify::{ReturnShapeClassifier, ShapeMismatch};
pub use extract::{MetadataExtractor, build_registry};
pub use plan::ContractAnalyzer;
