//! Ingesting input documents and planning output files.

use std::path::PathBuf;

use crate::errors::{LmtError, Result};
use crate::io::Transaction;
use crate::model::{BlockStore, BlockStoreBuilder, TargetPath};

use super::context::Context;

/// The result of ingesting a set of documents.
#[derive(Debug)]
pub struct Ingested {
    /// Blocks from every document that was read successfully.
    pub store: BlockStore,
    /// Documents that could not be read.
    pub failed: Vec<LmtError>,
}

impl Ingested {
    /// Returns true if every document was read.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Ingests documents in order.
///
/// With no explicit `files`, the configured source patterns are used. A
/// document that cannot be read is reported and skipped; it contributes no
/// blocks and the remaining documents are still ingested.
pub fn ingest_documents(ctx: &Context, files: &[PathBuf]) -> Result<Ingested> {
    let documents = ctx.input_documents(files)?;
    let mut builder = BlockStoreBuilder::new();
    let mut failed = Vec::new();

    for document in &documents {
        let identifier = document.to_string_lossy();
        let path = ctx.resolve_path(document);
        if let Err(e) = builder.ingest_path(&path, &*identifier) {
            tracing::warn!("{}", e);
            failed.push(e);
        }
    }

    let store = builder.build();
    tracing::debug!(
        "Ingested {} documents: {} named blocks, {} output files",
        documents.len() - failed.len(),
        store.block_count(),
        store.file_count()
    );

    Ok(Ingested { store, failed })
}

/// Output files to write, plus the targets that could not be expanded.
#[derive(Debug, Default)]
pub struct TanglePlan {
    /// Write actions for every target that expanded cleanly.
    pub transaction: Transaction,
    /// Targets whose expansion failed.
    pub failed: Vec<(TargetPath, LmtError)>,
}

/// Materializes output files from the store.
///
/// With `only` set, just that target is planned; a target that is not
/// declared is a warning, not an error.
pub fn tangle_documents(ctx: &Context, store: &BlockStore, only: Option<&str>) -> TanglePlan {
    let options = ctx.render_options();
    let mut plan = TanglePlan::default();

    let rendered = match only {
        Some(target) => {
            let target = TargetPath::from(target);
            if store.get_file(&target).is_none() {
                tracing::warn!("File named \"{}\" requested but not defined", target);
                return plan;
            }
            let result = store.materialize(&target, &options);
            vec![(target, result)]
        }
        None => store.output_files(&options),
    };

    for (target, result) in rendered {
        match result {
            Ok(content) => plan.transaction.write(ctx.output_path(target.as_path()), content),
            Err(e) => {
                tracing::error!("Cannot tangle {}: {}", target, e);
                plan.failed.push((target, e));
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_ingest_in_order_with_provenance() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.md"), "```go \"a\"\nfirst\n```\n").unwrap();
        fs::write(dir.path().join("two.md"), "```go \"a\" +=\nsecond\n```\n").unwrap();

        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        let files = vec![PathBuf::from("one.md"), PathBuf::from("two.md")];
        let ingested = ingest_documents(&ctx, &files).unwrap();

        assert!(ingested.is_complete());
        let block = ingested.store.resolve("a").unwrap();
        assert_eq!(block.text(), "first\nsecond\n");
        assert_eq!(&*block.lines()[1].location.document, "two.md");
    }

    #[test]
    fn test_unreadable_document_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ok.md"), "```go \"a\"\nx\n```\n").unwrap();

        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        let files = vec![PathBuf::from("missing.md"), PathBuf::from("ok.md")];
        let ingested = ingest_documents(&ctx, &files).unwrap();

        assert_eq!(ingested.failed.len(), 1);
        assert!(matches!(ingested.failed[0], LmtError::Document { .. }));
        assert_eq!(ingested.store.block_count(), 1);
    }

    #[test]
    fn test_plan_collects_failures() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("doc.md"),
            "```go bad.go\n<<<loop>>>\n```\n```go \"loop\"\n<<<loop>>>\n```\n```go good.go\nok\n```\n",
        )
        .unwrap();

        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        let ingested = ingest_documents(&ctx, &[PathBuf::from("doc.md")]).unwrap();
        let plan = tangle_documents(&ctx, &ingested.store, None);

        assert_eq!(plan.transaction.len(), 1);
        assert_eq!(plan.transaction.actions()[0].path, dir.path().join("good.go"));
        assert_eq!(plan.failed.len(), 1);
        assert_eq!(plan.failed[0].0, TargetPath::new("bad.go"));
    }

    #[test]
    fn test_plan_single_missing_target() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("doc.md"), "```go a.go\nx\n```\n").unwrap();

        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        let ingested = ingest_documents(&ctx, &[PathBuf::from("doc.md")]).unwrap();

        let plan = tangle_documents(&ctx, &ingested.store, Some("b.go"));
        assert!(plan.transaction.is_empty());
        assert!(plan.failed.is_empty());

        let plan = tangle_documents(&ctx, &ingested.store, Some("a.go"));
        assert_eq!(plan.transaction.len(), 1);
    }
}
