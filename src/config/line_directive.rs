//! Location-marker syntaxes keyed by language tag.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The closed set of location-marker syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDirective {
    /// `#line N "doc"`, for the shell family and perl.
    Hash,
    /// `//line doc:N`, understood by the Go compiler.
    Go,
    /// `#line N "doc"`, the C preprocessor directive.
    C,
}

impl LineDirective {
    /// Formats the marker line for `document` and `line`, without newline.
    pub fn format(&self, document: &str, line: usize) -> String {
        match self {
            LineDirective::Hash | LineDirective::C => format!("#line {} \"{}\"", line, document),
            LineDirective::Go => format!("//line {}:{}", document, line),
        }
    }
}

impl fmt::Display for LineDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineDirective::Hash => "hash",
            LineDirective::Go => "go",
            LineDirective::C => "c",
        };
        f.write_str(name)
    }
}

/// Built-in language tags and their markers. Tags are case-sensitive.
const BUILTIN_TAGS: &[(&str, LineDirective)] = &[
    ("bash", LineDirective::Hash),
    ("shell", LineDirective::Hash),
    ("sh", LineDirective::Hash),
    ("perl", LineDirective::Hash),
    ("go", LineDirective::Go),
    ("golang", LineDirective::Go),
    ("C", LineDirective::C),
    ("c", LineDirective::C),
];

static BUILTIN: Lazy<DirectiveTable> = Lazy::new(DirectiveTable::default);

/// Maps language tags to marker syntaxes; unknown tags get no marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveTable {
    tags: HashMap<String, LineDirective>,
}

impl DirectiveTable {
    /// Returns the shared built-in table.
    pub fn builtin() -> &'static DirectiveTable {
        &BUILTIN
    }

    /// Adds `tag` as an alias for `directive`.
    ///
    /// Built-in tags keep their marker.
    pub fn with_alias(mut self, tag: impl Into<String>, directive: LineDirective) -> Self {
        self.tags.entry(tag.into()).or_insert(directive);
        self
    }

    /// Looks up the marker for a language tag.
    pub fn lookup(&self, language: Option<&str>) -> Option<LineDirective> {
        language.and_then(|tag| self.tags.get(tag).copied())
    }
}

impl Default for DirectiveTable {
    fn default() -> Self {
        Self {
            tags: BUILTIN_TAGS
                .iter()
                .map(|(tag, directive)| (tag.to_string(), *directive))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        assert_eq!(LineDirective::Go.format("README.md", 149), "//line README.md:149");
        assert_eq!(LineDirective::Hash.format("a.md", 3), "#line 3 \"a.md\"");
        assert_eq!(LineDirective::C.format("a.md", 3), "#line 3 \"a.md\"");
    }

    #[test]
    fn test_builtin_lookup() {
        let table = DirectiveTable::builtin();
        assert_eq!(table.lookup(Some("golang")), Some(LineDirective::Go));
        assert_eq!(table.lookup(Some("perl")), Some(LineDirective::Hash));
        assert_eq!(table.lookup(Some("C")), Some(LineDirective::C));
        assert_eq!(table.lookup(Some("python")), None);
        assert_eq!(table.lookup(Some("Go")), None);
        assert_eq!(table.lookup(None), None);
    }

    #[test]
    fn test_alias() {
        let table = DirectiveTable::default()
            .with_alias("cpp", LineDirective::C)
            .with_alias("go", LineDirective::Hash);
        assert_eq!(table.lookup(Some("cpp")), Some(LineDirective::C));
        assert_eq!(table.lookup(Some("go")), Some(LineDirective::Go));
    }

    #[test]
    fn test_serde() {
        let directive: LineDirective = serde_json::from_str("\"go\"").unwrap();
        assert_eq!(directive, LineDirective::Go);
        assert_eq!(LineDirective::Hash.to_string(), "hash");
    }
}
