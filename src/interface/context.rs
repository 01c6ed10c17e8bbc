//! Execution context for lmt operations.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::{LmtError, Result};
use crate::model::RenderOptions;

/// Context for lmt operations.
///
/// Holds the effective configuration and the directory that relative input
/// and output paths are resolved against.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Base directory for operations.
    pub base_dir: PathBuf,
    /// Publishable flag from the command line, ORed with the configured one.
    pub publishable: bool,
}

impl Context {
    /// Creates a new context with the given configuration.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        Self {
            config,
            base_dir,
            publishable: false,
        }
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Self {
        Self::new(Config::default(), base_dir)
    }

    /// Creates a context from the current directory.
    pub fn from_current_dir() -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        let config = crate::config::read_config(&base_dir)?;
        Ok(Self::new(config, base_dir))
    }

    /// Sets the publishable flag.
    #[must_use]
    pub fn with_publishable(mut self, publishable: bool) -> Self {
        self.publishable = publishable;
        self
    }

    /// Render options for materialization and extraction.
    pub fn render_options(&self) -> RenderOptions {
        self.config.render_options(self.publishable)
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Where a materialized file with the given relative path is written.
    pub fn output_path(&self, target: &Path) -> PathBuf {
        match self.config.output_dir() {
            Some(dir) => self.resolve_path(dir).join(target),
            None => self.resolve_path(target),
        }
    }

    /// Returns the documents to ingest, in ingestion order.
    ///
    /// Explicit `files` are taken as given. Otherwise the configured source
    /// patterns are expanded relative to the base directory: each pattern's
    /// matches are sorted, and a document matched twice keeps its first
    /// position.
    pub fn input_documents(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        if !files.is_empty() {
            return Ok(files.to_vec());
        }

        let mut documents: Vec<PathBuf> = Vec::new();
        for pattern in &self.config.sources {
            let full_pattern = self.base_dir.join(pattern);
            let mut matches: Vec<PathBuf> = glob::glob(&full_pattern.to_string_lossy())?
                .filter_map(|entry| entry.ok())
                .filter(|path| path.is_file())
                .map(|path| {
                    path.strip_prefix(&self.base_dir)
                        .map(Path::to_path_buf)
                        .unwrap_or(path)
                })
                .collect();
            matches.sort();

            for path in matches {
                if !documents.contains(&path) {
                    documents.push(path);
                }
            }
        }

        if documents.is_empty() {
            return Err(LmtError::NoInputs);
        }
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_path() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());

        let resolved = ctx.resolve_path(Path::new("src/main.go"));
        assert_eq!(resolved, dir.path().join("src/main.go"));

        let resolved = ctx.resolve_path(Path::new("/absolute/path"));
        assert_eq!(resolved, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_output_path_uses_output_dir() {
        let dir = tempdir().unwrap();
        let mut ctx = Context::default_for_dir(dir.path().to_path_buf());
        assert_eq!(ctx.output_path(Path::new("a.go")), dir.path().join("a.go"));

        ctx.config.output_dir = Some(PathBuf::from("build"));
        assert_eq!(ctx.output_path(Path::new("a.go")), dir.path().join("build/a.go"));
    }

    #[test]
    fn test_explicit_files_win() {
        let dir = tempdir().unwrap();
        let mut ctx = Context::default_for_dir(dir.path().to_path_buf());
        ctx.config.sources = vec!["*.md".to_string()];

        let files = vec![PathBuf::from("b.md"), PathBuf::from("a.md")];
        assert_eq!(ctx.input_documents(&files).unwrap(), files);
    }

    #[test]
    fn test_source_patterns_in_order() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("addons")).unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();
        fs::write(dir.path().join("addons/z.md"), "").unwrap();
        fs::write(dir.path().join("addons/a.md"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let mut ctx = Context::default_for_dir(dir.path().to_path_buf());
        ctx.config.sources = vec![
            "README.md".to_string(),
            "addons/*.md".to_string(),
            "*.md".to_string(),
        ];

        let documents = ctx.input_documents(&[]).unwrap();
        assert_eq!(
            documents,
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("addons/a.md"),
                PathBuf::from("addons/z.md"),
            ]
        );
    }

    #[test]
    fn test_no_inputs() {
        let dir = tempdir().unwrap();
        let mut ctx = Context::default_for_dir(dir.path().to_path_buf());
        assert!(matches!(ctx.input_documents(&[]), Err(LmtError::NoInputs)));

        ctx.config.sources = vec!["*.md".to_string()];
        assert!(matches!(ctx.input_documents(&[]), Err(LmtError::NoInputs)));
    }
}
