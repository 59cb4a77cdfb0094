//! Rust code generation for repogen.
//!
//! [`RustSink`] renders synthesized repositories as Rust source and
//! [`Generator`] lays the files out under the output directory, mirroring
//! each contract's module.

mod generator;
mod rust_file;
mod sink;

pub mod ast;
pub mod files;

pub use ast::{Field, Fn, Impl, Param, Struct};
pub use generator::Generator;
pub use repogen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use rust_file::{RustFile, Use};
pub use sink::RustSink;
