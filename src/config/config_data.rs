//! Configuration data structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::language::Language;
use super::line_directive::DirectiveTable;
use crate::model::RenderOptions;

/// Main configuration structure for lmt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns for documents to ingest when none are given explicitly.
    /// Order matters: later documents override earlier ones.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Directory that output file paths are relative to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Render without location markers by default.
    #[serde(default)]
    pub publishable: bool,

    /// Extra language tags for location markers.
    #[serde(default)]
    pub languages: Vec<Language>,

    /// Watch configuration.
    #[serde(default)]
    pub watch: WatchConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the marker table: built-in tags plus configured aliases.
    pub fn directives(&self) -> DirectiveTable {
        self.languages
            .iter()
            .flat_map(|lang| lang.tags().map(move |tag| (tag, lang.directive)))
            .fold(DirectiveTable::default(), |table, (tag, directive)| {
                table.with_alias(tag, directive)
            })
    }

    /// Render options for this configuration; `publishable` forces
    /// publishable output on top of the configured default.
    pub fn render_options(&self, publishable: bool) -> RenderOptions {
        RenderOptions {
            publishable: publishable || self.publishable,
            directives: self.directives(),
        }
    }

    /// Returns the output directory, if configured.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}

/// Watch mode configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

fn default_debounce() -> u64 {
    100
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
        }
    }
}
