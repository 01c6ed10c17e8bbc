//! Text location tracking for line provenance.

use std::fmt;
use std::sync::Arc;

/// Where a line of code came from: the document it was read from and its
/// 1-based line number within that document.
///
/// The document identifier is shared between every line of a document, so
/// cloning a location is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextLocation {
    /// The document identifier, as given to ingestion.
    pub document: Arc<str>,
    /// Line number (1-indexed).
    pub line: usize,
}

impl TextLocation {
    /// Creates a new TextLocation.
    pub fn new(document: impl Into<Arc<str>>, line: usize) -> Self {
        Self {
            document: document.into(),
            line,
        }
    }

    /// Returns true if `next` is the line directly after this one in the same
    /// document.
    pub fn is_followed_by(&self, next: &TextLocation) -> bool {
        self.document == next.document && self.line + 1 == next.line
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.document, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let loc = TextLocation::new("README.md", 10);
        assert_eq!(format!("{}", loc), "README.md:10");
    }

    #[test]
    fn test_is_followed_by() {
        let loc = TextLocation::new("a.md", 4);
        assert!(loc.is_followed_by(&TextLocation::new("a.md", 5)));
        assert!(!loc.is_followed_by(&TextLocation::new("a.md", 6)));
        assert!(!loc.is_followed_by(&TextLocation::new("a.md", 4)));
        assert!(!loc.is_followed_by(&TextLocation::new("b.md", 5)));
    }
}
