//! Listing of declared block and file keys.

use std::io::Write;
use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::{ingest_documents, Context};

/// Options for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Documents to ingest (empty means the configured sources).
    pub files: Vec<PathBuf>,
    /// List output file keys instead of named blocks.
    pub output_files: bool,
    /// Print a JSON array instead of one key per line.
    pub json: bool,
}

/// Writes the sorted keys of one table to `out`.
pub fn list(ctx: &Context, options: &ListOptions, out: &mut impl Write) -> Result<()> {
    let ingested = ingest_documents(ctx, &options.files)?;
    let store = &ingested.store;

    let keys: Vec<&str> = if options.output_files {
        store.file_names().into_iter().map(|k| k.as_str()).collect()
    } else {
        store.block_names().into_iter().map(|k| k.as_str()).collect()
    };

    if options.json {
        serde_json::to_writer(&mut *out, &keys)?;
        writeln!(out)?;
    } else {
        for key in keys {
            writeln!(out, "{}", key)?;
        }
    }
    Ok(())
}
