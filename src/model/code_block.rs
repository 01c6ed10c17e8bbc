//! Code block representation.

use super::code_line::CodeLine;

/// An ordered sequence of annotated lines.
///
/// The same type backs named blocks, output file blocks and the result of
/// macro expansion; which table holds a block is what gives it its role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    lines: Vec<CodeLine>,
}

impl CodeBlock {
    /// Creates a new empty CodeBlock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line.
    pub fn push(&mut self, line: CodeLine) {
        self.lines.push(line);
    }

    /// Appends all lines of `other` after the lines of this block.
    pub fn append(&mut self, other: CodeBlock) {
        self.lines.extend(other.lines);
    }

    /// Returns the lines in order.
    pub fn lines(&self) -> &[CodeLine] {
        &self.lines
    }

    /// Returns an iterator over the lines.
    pub fn iter(&self) -> std::slice::Iter<'_, CodeLine> {
        self.lines.iter()
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the block has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the raw text of all lines joined together.
    pub fn text(&self) -> String {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

impl From<Vec<CodeLine>> for CodeBlock {
    fn from(lines: Vec<CodeLine>) -> Self {
        Self { lines }
    }
}

impl FromIterator<CodeLine> for CodeBlock {
    fn from_iter<I: IntoIterator<Item = CodeLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl Extend<CodeLine> for CodeBlock {
    fn extend<I: IntoIterator<Item = CodeLine>>(&mut self, iter: I) {
        self.lines.extend(iter);
    }
}

impl<'a> IntoIterator for &'a CodeBlock {
    type Item = &'a CodeLine;
    type IntoIter = std::slice::Iter<'a, CodeLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
