//! Tangle command implementation.

use std::path::PathBuf;

use crate::errors::{LmtError, Result};
use crate::interface::{ingest_documents, tangle_documents, Context};

/// Options for the tangle command.
#[derive(Debug, Clone, Default)]
pub struct TangleOptions {
    /// Documents to ingest (empty means the configured sources).
    pub files: Vec<PathBuf>,
    /// Materialize only this output file.
    pub output: Option<String>,
    /// Dry run - show what would be done without doing it.
    pub dry_run: bool,
}

/// Executes the tangle command.
///
/// Every output file is attempted; the pass fails at the end if any
/// document or output file failed along the way.
pub fn tangle(ctx: &Context, options: &TangleOptions) -> Result<()> {
    tracing::debug!("Tangling documents...");

    let ingested = ingest_documents(ctx, &options.files)?;
    let plan = tangle_documents(ctx, &ingested.store, options.output.as_deref());
    let mut failures = ingested.failed.len() + plan.failed.len();

    if plan.transaction.is_empty() {
        tracing::info!("No files to tangle.");
    } else if options.dry_run {
        println!("Would perform {} actions:", plan.transaction.len());
        for desc in plan.transaction.describe() {
            println!("  {}", desc);
        }
    } else {
        let report = plan.transaction.execute();
        failures += report.failed.len();
        tracing::info!(
            "Tangled {} files ({} unchanged).",
            report.written.len(),
            report.unchanged.len()
        );
    }

    if failures > 0 {
        return Err(LmtError::Incomplete(failures));
    }
    Ok(())
}
