//! Line-oriented code builder.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates lines of code at a tracked indentation level.
///
/// Consuming methods (returning `Self`) suit flat files built in one chain;
/// [`emit`](Self::emit) renders [`Renderable`] nodes in place.
///
/// # Example
///
/// ```
/// use repogen_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::rust()
///     .each(["repo", "model"], |b, module| b.line(&format!("pub mod {};", module)))
///     .build();
///
/// assert_eq!(code, "pub mod repo;\npub mod model;\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// A builder with rustfmt's 4-space indentation.
    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    /// Add a line at the current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.indent.write(&mut self.buffer, self.level);
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add an empty line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Render a node at the current indentation.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Render one fragment at the current indentation.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block { header, body } => {
                self.push_line(&header);
                self.level += 1;
                for f in body {
                    self.apply_fragment(f);
                }
                self.level -= 1;
                self.push_line("}");
            }
            CodeFragment::Doc(text) if text.is_empty() => {
                self.push_line("///");
            }
            CodeFragment::Doc(text) => {
                self.push_line(&format!("/// {}", text));
            }
        }
    }

    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Run `f` once per item, threading the builder through.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::rust()
    }
}
