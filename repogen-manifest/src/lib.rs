// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Configuration for the repogen code generator.
//!
//! A project is described by a `repogen.toml` file:
//!
//! ```toml
//! [project]
//! name = "users"
//! sources = ["src"]
//! output = "src/generated"
//!
//! [runtime]
//! monad = "Uni"
//! select_multiple = "select_multiple"
//! ```
//!
//! Every section except `[project]` is optional and falls back to the
//! defaults documented on each field.

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    CodegenConfig, DuplicateBindPolicy, Manifest, MarkerConfig, ParseContext, ProjectConfig,
    RepogenToml, RuntimeConfig,
};
