//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Tracks the table currently being validated so errors can name the
/// offending key (`runtime.select`) and point at its value in the file.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "repogen.toml");
/// ctx.push("runtime").validate_identifier("select", "select")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Table path (e.g., ["runtime"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Dotted name of `key` inside the current table, e.g. `runtime.select`.
    pub fn key_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path.join("."), key)
        }
    }

    /// Find the span of a string value assigned to `key`.
    pub fn find_span(&self, key: &str, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), key, value)
    }

    /// Fail with a validation error pointing at `key = "value"`.
    pub fn error_at(&self, key: &str, value: &str, message: impl Into<String>) -> Box<crate::Error> {
        self.source
            .validation_error(message, self.find_span(key, value))
    }

    /// Require `value` to be non-empty.
    pub fn require_non_empty(&self, key: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(self.error_at(
                key,
                value,
                format!("'{}' cannot be empty", self.key_path(key)),
            ));
        }
        Ok(())
    }

    /// Require `value` to be a plain Rust identifier.
    pub fn validate_identifier(&self, key: &str, value: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(value) {
            return Err(self.error_at(
                key,
                value,
                format!("invalid '{}' value '{}': {}", self.key_path(key), value, reason),
            ));
        }
        Ok(())
    }

    /// Require `value` to be a `::`-separated Rust path.
    pub fn validate_path(&self, key: &str, value: &str) -> Result<()> {
        if let Some(reason) = validate_path(value) {
            return Err(self.error_at(
                key,
                value,
                format!("invalid '{}' value '{}': {}", self.key_path(key), value, reason),
            ));
        }
        Ok(())
    }
}

/// Rust reserved keywords that cannot be used as identifiers
/// Source: https://doc.rust-lang.org/reference/keywords.html
pub(crate) const RUST_KEYWORDS: &[&str] = &[
    // Strict keywords (2021 edition)
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
    // Reserved keywords (may be used in future)
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
];

/// Check if a name is a Rust reserved keyword
pub(crate) fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Find the span of `value` in a `key = "value"` assignment.
pub(crate) fn find_value_span(src: &str, key: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        for sep in [" = ", "="] {
            let pattern = format!("{}{}{}{}{}", key, sep, quote, value, quote);
            if let Some(pos) = src.find(&pattern) {
                let start = pos + key.len() + sep.len() + 1;
                return Some(SourceSpan::from((start, value.len())));
            }
        }
    }

    // Values inside arrays, e.g. sources = ["src", "lib"]
    if !value.is_empty() {
        let quoted = format!("\"{}\"", value);
        if let Some(pos) = src.find(&quoted) {
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }

    None
}

/// Validate that a name is a valid Rust identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name cannot be empty");
    }

    if is_rust_keyword(name) {
        return Some("name is a Rust reserved keyword");
    }

    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

/// Validate a `::`-separated path. A leading `crate` segment is allowed.
pub(crate) fn validate_path(path: &str) -> Option<&'static str> {
    if path.is_empty() {
        return Some("path cannot be empty");
    }

    for (i, segment) in path.split("::").enumerate() {
        if i == 0 && segment == "crate" {
            continue;
        }
        if segment.is_empty() {
            return Some("path contains an empty segment");
        }
        if let Some(reason) = validate_identifier(segment) {
            return Some(reason);
        }
    }

    None
}
