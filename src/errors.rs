//! Error types for lmt.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::BlockName;

/// Main error type for lmt operations.
#[derive(Error, Debug)]
pub enum LmtError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Block named \"{0}\" requested but not defined")]
    NotFound(String),

    #[error("Cyclic reference: {}", format_cycle(.0))]
    CycleDetected(Vec<BlockName>),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("no input documents given and no configured source matched")]
    NoInputs,

    #[error("{0} document(s) or output file(s) failed")]
    Incomplete(usize),

    #[error("Watch error: {0}")]
    Watch(String),
}

fn format_cycle(chain: &[BlockName]) -> String {
    chain
        .iter()
        .map(BlockName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type alias for lmt operations.
pub type Result<T> = std::result::Result<T, LmtError>;
