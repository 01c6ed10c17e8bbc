//! Fence recognition and header classification.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::{BlockName, TargetPath};

/// Header of a named block: optional language, quoted name, optional `+=`.
static NAMED_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?P<fence>`{3,}|~{3,})\s?(?P<language>\w*)\s*"(?P<name>.+)"\s*(?P<append>\+=)?$"#)
        .unwrap()
});

/// Header of an output file: required language, bare path, optional `+=`.
static FILE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<fence>`{3,}|~{3,})\s?(?P<language>\w+)\s+(?P<file>[\w./-]+)\s*(?P<append>\+=)?$")
        .unwrap()
});

/// The delimiter that opened a fenced region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    /// The fence character, a backtick or a tilde.
    pub char: char,
    /// How many times the character was repeated.
    pub len: usize,
}

impl Fence {
    /// Minimum run length of a fence delimiter.
    pub const MIN_LEN: usize = 3;

    /// Recognizes a line that opens a fence.
    ///
    /// The run must start at the first column; indented fences are prose.
    pub fn opening(line: &str) -> Option<Fence> {
        let char = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = line.chars().take_while(|c| *c == char).count();
        (len >= Self::MIN_LEN).then_some(Fence { char, len })
    }

    /// Returns true if `line` closes this fence.
    ///
    /// After trimming, the line must consist only of the fence character and
    /// be at least as long as the opening run.
    pub fn is_closed_by(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.len() >= self.len && trimmed.chars().all(|c| c == self.char)
    }
}

/// What a classified fence contributes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderKind {
    /// A named block, referenced by macro lines.
    Named(BlockName),
    /// A complete output file.
    File(TargetPath),
}

/// A parsed fence header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceHeader {
    /// Which table the block goes to, and under which key.
    pub kind: HeaderKind,
    /// Declared language word, if any.
    pub language: Option<String>,
    /// True when the header ends in `+=`.
    pub append: bool,
    /// The opening delimiter.
    pub fence: Fence,
}

/// Classifies a fence-opening line.
///
/// The named form is tried before the file form. Returns `None` for
/// anonymous fences, whose content belongs to neither table.
pub fn parse_header(line: &str) -> Option<FenceHeader> {
    let line = line.trim();

    if let Some(caps) = NAMED_HEADER.captures(line) {
        return Some(from_captures(&caps, HeaderKind::Named(BlockName::new(&caps["name"]))));
    }
    if let Some(caps) = FILE_HEADER.captures(line) {
        return Some(from_captures(&caps, HeaderKind::File(TargetPath::new(&caps["file"]))));
    }
    None
}

fn from_captures(caps: &Captures<'_>, kind: HeaderKind) -> FenceHeader {
    let fence = &caps["fence"];
    let language = &caps["language"];
    FenceHeader {
        kind,
        language: (!language.is_empty()).then(|| language.to_string()),
        append: caps.name("append").is_some(),
        fence: Fence {
            // The capture is a run of a single ASCII character.
            char: fence.chars().next().unwrap_or('`'),
            len: fence.len(),
        },
    }
}
