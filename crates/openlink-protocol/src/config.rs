//! XML text adapter configuration.

/// Settings for converting between wire text and [`Element`](crate::Element) trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlConfig {
    /// Spaces per nesting level when rendering; `None` renders compactly.
    pub indent: Option<usize>,

    /// Whether rendered text starts with an `<?xml ...?>` declaration.
    pub include_declaration: bool,

    /// Whether the reader drops whitespace-only text between elements.
    pub trim_text: bool,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            indent: None,
            include_declaration: false,
            trim_text: true,
        }
    }
}

impl XmlConfig {
    /// Compact, declaration-free output; what goes on the wire.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Indented output with a declaration, for logs and fixtures.
    pub fn pretty() -> Self {
        Self {
            indent: Some(2),
            include_declaration: true,
            ..Default::default()
        }
    }

    /// Builder: set the indentation width.
    pub fn with_indent(mut self, spaces: usize) -> Self {
        self.indent = Some(spaces);
        self
    }

    /// Builder: set whether to emit an XML declaration.
    pub fn with_declaration(mut self, include: bool) -> Self {
        self.include_declaration = include;
        self
    }

    /// Builder: set whether to trim whitespace-only text when reading.
    pub fn with_trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }
}
