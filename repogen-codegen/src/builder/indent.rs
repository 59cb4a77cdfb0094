//! Indentation configuration for code generation.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(usize),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation, as rustfmt lays it out.
    pub const RUST: Self = Self::Spaces(4);

    /// Append `level` indentation units to `buffer`.
    pub fn write(&self, buffer: &mut String, level: usize) {
        match self {
            Self::Spaces(width) => buffer.extend(std::iter::repeat_n(' ', width * level)),
            Self::Tab => buffer.extend(std::iter::repeat_n('\t', level)),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::RUST
    }
}
