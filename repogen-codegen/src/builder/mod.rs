//! Code generation building blocks.
//!
//! Language crates describe emitted code as [`Renderable`] nodes made of
//! [`CodeFragment`]s and lay them out with a [`CodeBuilder`].

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
