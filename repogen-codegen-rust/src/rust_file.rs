//! RustFile abstraction for structured Rust file generation.
//!
//! Provides a high-level API for generating Rust files with
//! grouped imports and body content.

use repogen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

/// A Rust use statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Use {
    module: String,
    symbols: Vec<String>,
}

impl Use {
    /// Create a use statement for a path, imported as is.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbols: Vec::new(),
        }
    }

    /// Add a symbol to import from the module.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    fn format(&self) -> String {
        match self.symbols.as_slice() {
            [] => format!("use {};", self.module),
            [symbol] => format!("use {}::{};", self.module, symbol),
            symbols => format!("use {}::{{{}}};", self.module, symbols.join(", ")),
        }
    }
}

impl Renderable for Use {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(self.format())]
    }
}

/// A structured representation of a Rust file.
///
/// Inner attributes come first, then import groups separated by blank
/// lines, then body items separated by blank lines.
///
/// # Example
///
/// ```ignore
/// let file = RustFile::new()
///     .use_group([Use::new("std::ops").symbol("Deref")])
///     .add(my_struct)
///     .add(my_impl)
///     .render();
/// ```
#[derive(Default)]
pub struct RustFile {
    inner_attrs: Vec<String>,
    uses: Vec<Vec<Use>>,
    body: Vec<Vec<CodeFragment>>,
}

impl RustFile {
    /// Create a new empty RustFile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file-level attribute, rendered as `#![...]`.
    pub fn inner_attr(mut self, attr: impl Into<String>) -> Self {
        self.inner_attrs.push(attr.into());
        self
    }

    /// Add a group of use statements. Empty groups are ignored.
    pub fn use_group(mut self, uses: impl IntoIterator<Item = Use>) -> Self {
        let group: Vec<Use> = uses.into_iter().collect();
        if !group.is_empty() {
            self.uses.push(group);
        }
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Render the file with Rust indentation (4 spaces).
    pub fn render(&self) -> String {
        self.render_with_indent(Indent::RUST)
    }

    /// Render the file with custom indentation.
    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);
        let mut first = true;
        let mut section = |builder: &mut CodeBuilder| {
            if !first {
                builder.push_blank();
            }
            first = false;
        };

        if !self.inner_attrs.is_empty() {
            section(&mut builder);
            for attr in &self.inner_attrs {
                builder.push_line(&format!("#![{}]", attr));
            }
        }

        for group in &self.uses {
            section(&mut builder);
            for use_stmt in group {
                builder.emit(use_stmt);
            }
        }

        for fragments in &self.body {
            section(&mut builder);
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }

    /// Check if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.inner_attrs.is_empty() && self.uses.is_empty() && self.body.is_empty()
    }
}
