//! lmt - Literate Markdown Tangle
//!
//! Extracts code from fenced blocks in Markdown documents. Fences with a
//! quoted name declare reusable named blocks; fences with a path declare
//! output files. Lines of the form `<<<name>>>` inside a block are replaced by
//! the named block, indented to match the reference. Output files carry
//! location markers (`//line doc.md:12`, `#line 12 "doc.md"`) so compilers
//! report errors against the Markdown source.
//!
//! # Example
//!
//! ```
//! use lmt::model::{BlockStoreBuilder, RenderOptions};
//!
//! let mut builder = BlockStoreBuilder::new();
//! builder.ingest_str("```go \"body\"\nreturn 1\n```\n", "doc.md");
//! builder.ingest_str("```go main.go\nfunc f() int {\n\t<<<body>>>\n}\n```\n", "doc.md");
//! let store = builder.build();
//!
//! let options = RenderOptions { publishable: true, ..Default::default() };
//! let text = store.extract("main.go", &options).unwrap();
//! assert_eq!(text, "func f() int {\n\treturn 1\n}\n");
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod text_location;

// Re-export commonly used types
pub use config::Config;
pub use errors::{LmtError, Result};
pub use interface::Context;
pub use model::{BlockName, BlockStore, BlockStoreBuilder, CodeBlock, CodeLine, RenderOptions, TargetPath};
pub use text_location::TextLocation;

// Re-export command options
pub use commands::{ExtractOptions, ListOptions, TangleOptions, WatchOptions};
