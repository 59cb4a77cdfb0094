//! Analysis and synthesis engine for repogen.
//!
//! This crate turns scanned declarations into repository implementations,
//! independent of the language they are emitted in. Language crates (e.g.,
//! `repogen-codegen-rust`) plug in through [`synth::CodeSink`] and
//! [`language::LanguageCodegen`].
//!
//! # Module Organization
//!
//! - [`analysis`] - Contract extraction, return shape classification, parameter binding
//! - [`pipeline`] - Compilation phases, lints, plugins and diagnostics
//! - [`synth`] - Type and method synthesis through code sinks
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`language`] - Language generator abstractions (LanguageCodegen, PreviewFile, etc.)

pub mod analysis;
pub mod builder;
mod error;
pub mod language;
pub mod pipeline;
pub mod synth;

pub use error::GenerationError;
