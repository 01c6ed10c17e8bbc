//! Readers for fenced literate documents.

mod fence;
mod markdown;

pub use fence::{parse_header, Fence, FenceHeader, HeaderKind};
pub use markdown::{scan_document, scan_reader, DocumentScanner, ScannedBlock};
