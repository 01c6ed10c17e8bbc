//! Core model types: lines, blocks, block tables, expansion and rendering.

mod block_name;
mod block_store;
mod code_block;
mod code_line;
mod render;
mod tangle;

pub use block_name::{BlockName, TargetPath};
pub use block_store::{BlockStore, BlockStoreBuilder};
pub use code_block::CodeBlock;
pub use code_line::CodeLine;
pub use render::{render, render_with, RenderOptions};
pub use tangle::{expand_block, CycleDetector, Expander, REF_PATTERN};
