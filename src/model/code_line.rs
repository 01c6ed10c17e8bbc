//! A single line of code with its provenance.

use std::sync::Arc;

use crate::text_location::TextLocation;

/// One raw line taken from inside a fence.
///
/// `text` keeps its line terminator, so concatenating the texts of a block
/// reproduces the fenced content byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    /// The raw text, including the trailing newline if there was one.
    pub text: String,
    /// Document and line number the text was read from.
    pub location: TextLocation,
    /// Language tag of the enclosing fence header.
    pub language: Option<Arc<str>>,
}

impl CodeLine {
    /// Creates a new CodeLine.
    pub fn new(text: impl Into<String>, location: TextLocation, language: Option<Arc<str>>) -> Self {
        Self {
            text: text.into(),
            location,
            language,
        }
    }

    /// Returns the language tag, if the fence declared one.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Returns a copy of this line with `indent` prepended to its text.
    ///
    /// A bare newline stays bare so that blank lines never pick up trailing
    /// whitespace.
    pub fn indented(&self, indent: &str) -> Self {
        if indent.is_empty() || self.text == "\n" {
            return self.clone();
        }
        Self {
            text: format!("{}{}", indent, self.text),
            location: self.location.clone(),
            language: self.language.clone(),
        }
    }
}
