//! Extra language tags configured by the user.

use serde::{Deserialize, Serialize};

use super::line_directive::LineDirective;

/// Maps additional language tags onto one of the marker syntaxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language tag as written in fence headers (e.g. "cpp").
    pub name: String,

    /// Further tags for the same language.
    #[serde(default)]
    pub identifiers: Vec<String>,

    /// Marker syntax to emit for these tags.
    pub directive: LineDirective,
}

impl Language {
    /// Creates a new Language configuration.
    pub fn new(name: impl Into<String>, directive: LineDirective) -> Self {
        Self {
            name: name.into(),
            identifiers: Vec::new(),
            directive,
        }
    }

    /// Adds identifiers.
    pub fn with_identifiers(mut self, identifiers: Vec<String>) -> Self {
        self.identifiers = identifiers;
        self
    }

    /// Returns every tag this entry covers.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.identifiers.iter().map(String::as_str))
    }
}
