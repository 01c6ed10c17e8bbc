//! High-level operations over a set of input documents.

mod context;
mod documents;

pub use context::Context;
pub use documents::{ingest_documents, tangle_documents, Ingested, TanglePlan};
