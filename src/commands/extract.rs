//! Single-target extraction to a writer.

use std::io::Write;
use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::{ingest_documents, Context};

/// Options for the extract and concat commands.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Block or file key to look up.
    pub name: String,
    /// Documents to ingest (empty means the configured sources).
    pub files: Vec<PathBuf>,
}

/// Writes the fully expanded block named `options.name` to `out`.
pub fn extract(ctx: &Context, options: &ExtractOptions, out: &mut impl Write) -> Result<()> {
    let ingested = ingest_documents(ctx, &options.files)?;
    let text = ingested.store.extract(&options.name, &ctx.render_options())?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Writes the block named `options.name` to `out` as accumulated, leaving
/// macro references in place.
pub fn concat(ctx: &Context, options: &ExtractOptions, out: &mut impl Write) -> Result<()> {
    let ingested = ingest_documents(ctx, &options.files)?;
    let text = ingested.store.concatenate(&options.name, &ctx.render_options())?;
    out.write_all(text.as_bytes())?;
    Ok(())
}
