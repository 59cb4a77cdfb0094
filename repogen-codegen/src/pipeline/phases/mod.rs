//! Built-in pipeline phases.
//!
//! This module provides the standard phases that run in every pipeline:
//!
//! - [`ExtractPhase`] - describes every marked contract
//! - [`AnalyzePhase`] - classifies and binds every query method
//! - [`ValidatePhase`] - runs lints over the plans

mod analyze;
mod extract;
mod validate;

pub use analyze::AnalyzePhase;
pub use extract::ExtractPhase;
pub use validate::{
    DuplicateBindNameLint, DuplicateImplNameLint, Lint, LintContext,
    UnboundParameterLint, UnimplementedMethodLint, ValidatePhase,
};
