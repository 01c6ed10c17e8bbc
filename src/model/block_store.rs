//! The two block tables: named blocks and output files.
//!
//! Ingestion goes through [`BlockStoreBuilder`], which is the only type that
//! can change a table. [`BlockStoreBuilder::build`] freezes the tables into a
//! [`BlockStore`], which expansion and rendering read from.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;

use super::block_name::{BlockName, TargetPath};
use super::code_block::CodeBlock;
use super::render::{render_with, RenderOptions};
use super::tangle::Expander;
use crate::errors::{LmtError, Result};
use crate::readers::{scan_document, scan_reader, HeaderKind, ScannedBlock};

/// Mutable block tables, filled one document at a time.
///
/// Documents must be ingested in order: a later fence with the same key
/// replaces the block, or extends it when the header ends in `+=`.
#[derive(Debug, Clone, Default)]
pub struct BlockStoreBuilder {
    named: IndexMap<BlockName, CodeBlock>,
    files: IndexMap<TargetPath, CodeBlock>,
}

impl BlockStoreBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits one closed fence.
    pub fn commit(&mut self, scanned: ScannedBlock) {
        match scanned.kind {
            HeaderKind::Named(name) => commit_into(&mut self.named, name, scanned.block, scanned.append),
            HeaderKind::File(path) => commit_into(&mut self.files, path, scanned.block, scanned.append),
        }
    }

    /// Ingests an in-memory document.
    pub fn ingest_str(&mut self, text: &str, document: impl Into<Arc<str>>) {
        for scanned in scan_document(text, document) {
            self.commit(scanned);
        }
    }

    /// Ingests a document from a reader.
    ///
    /// The document is committed only once it has been read to the end; on a
    /// read failure the tables are left as they were.
    pub fn ingest_reader<R: BufRead>(&mut self, reader: R, document: impl Into<Arc<str>>) -> std::io::Result<()> {
        let scanned = scan_reader(reader, document)?;
        for block in scanned {
            self.commit(block);
        }
        Ok(())
    }

    /// Ingests the document at `path`, identified in markers by `document`.
    pub fn ingest_path(&mut self, path: &Path, document: impl Into<Arc<str>>) -> Result<()> {
        let document = document.into();
        tracing::debug!("Reading {} from {}", document, path.display());

        File::open(path)
            .and_then(|file| self.ingest_reader(BufReader::new(file), document))
            .map_err(|source| LmtError::Document {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Freezes the tables.
    #[must_use]
    pub fn build(self) -> BlockStore {
        BlockStore {
            named: self.named,
            files: self.files,
        }
    }
}

fn commit_into<K: std::hash::Hash + Eq>(
    table: &mut IndexMap<K, CodeBlock>,
    key: K,
    block: CodeBlock,
    append: bool,
) {
    if append {
        table.entry(key).or_default().append(block);
    } else {
        table.insert(key, block);
    }
}

/// Frozen block tables.
///
/// Both tables remember the order in which their keys were first declared.
#[derive(Debug, Clone, Default)]
pub struct BlockStore {
    named: IndexMap<BlockName, CodeBlock>,
    files: IndexMap<TargetPath, CodeBlock>,
}

impl BlockStore {
    /// Returns the named block with the given name.
    pub fn get_block(&self, name: &BlockName) -> Option<&CodeBlock> {
        self.named.get(name)
    }

    /// Returns the output file block for the given path.
    pub fn get_file(&self, path: &TargetPath) -> Option<&CodeBlock> {
        self.files.get(path)
    }

    /// Looks a user-supplied key up, output files first, then named blocks.
    pub fn resolve(&self, key: &str) -> Result<&CodeBlock> {
        self.files
            .get(&TargetPath::from(key))
            .or_else(|| self.named.get(&BlockName::from(key)))
            .ok_or_else(|| LmtError::NotFound(key.to_string()))
    }

    /// All named-block keys, sorted.
    pub fn block_names(&self) -> Vec<&BlockName> {
        let mut names: Vec<_> = self.named.keys().collect();
        names.sort();
        names
    }

    /// All output-file keys, sorted.
    pub fn file_names(&self) -> Vec<&TargetPath> {
        let mut names: Vec<_> = self.files.keys().collect();
        names.sort();
        names
    }

    /// Returns the output file blocks in declaration order.
    pub fn files(&self) -> impl Iterator<Item = (&TargetPath, &CodeBlock)> {
        self.files.iter()
    }

    /// Returns the number of named blocks.
    pub fn block_count(&self) -> usize {
        self.named.len()
    }

    /// Returns the number of output files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Renders the block stored under `key` as accumulated, without
    /// resolving its references.
    pub fn concatenate(&self, key: &str, options: &RenderOptions) -> Result<String> {
        let block = self.resolve(key)?;
        Ok(render_with(block, options))
    }

    /// Expands and renders the block stored under `key`.
    pub fn extract(&self, key: &str, options: &RenderOptions) -> Result<String> {
        let block = self.resolve(key)?;
        let mut expander = Expander::new(self);
        // An output file of the same name shadows the named block.
        if !self.files.contains_key(&TargetPath::from(key)) {
            expander = expander.within(&BlockName::from(key))?;
        }
        let expanded = expander.expand(block, "")?;
        Ok(render_with(&expanded, options))
    }

    /// Expands and renders one output file.
    pub fn materialize(&self, path: &TargetPath, options: &RenderOptions) -> Result<String> {
        let block = self
            .get_file(path)
            .ok_or_else(|| LmtError::NotFound(path.to_string()))?;
        let expanded = Expander::new(self).expand(block, "")?;
        Ok(render_with(&expanded, options))
    }

    /// Expands and renders every output file, in declaration order.
    ///
    /// Each file is independent: a failure in one does not affect the others.
    pub fn output_files(&self, options: &RenderOptions) -> Vec<(TargetPath, Result<String>)> {
        self.files
            .keys()
            .map(|path| (path.clone(), self.materialize(path, options)))
            .collect()
    }
}
