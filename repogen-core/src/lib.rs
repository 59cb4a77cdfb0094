//! Core utilities and types for repogen.
//!
//! This crate provides file writing rules and string utilities shared
//! across the repogen crates.

mod file;
mod utils;

// File operations
pub use file::{FileRules, GENERATED_HEADER, GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use utils::to_snake_case;
