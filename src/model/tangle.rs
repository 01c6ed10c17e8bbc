//! Macro expansion of code blocks.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{LmtError, Result};

use super::block_name::BlockName;
use super::block_store::BlockStore;
use super::code_block::CodeBlock;

/// A line that stands for another named block.
///
/// Accepts `<<name>>>`, `<<<name>>>` and `//<name>>>`, optionally indented and
/// followed by trailing whitespace, and nothing else on the line.
pub static REF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>\s*)(?:<<<?|//<)(?P<name>.+)>>>\s*$").unwrap()
});

/// Tracks the chain of names being expanded so re-entry is caught.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    stack: Vec<BlockName>,
    seen: HashSet<BlockName>,
}

impl CycleDetector {
    /// Creates a new cycle detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a name, failing if it is already on the chain.
    pub fn enter(&mut self, name: &BlockName) -> Result<()> {
        if self.seen.contains(name) {
            let mut cycle: Vec<BlockName> = self
                .stack
                .iter()
                .skip_while(|entered| *entered != name)
                .cloned()
                .collect();
            cycle.push(name.clone());
            return Err(LmtError::CycleDetected(cycle));
        }
        self.seen.insert(name.clone());
        self.stack.push(name.clone());
        Ok(())
    }

    /// Leaves the innermost name.
    pub fn exit(&mut self) {
        if let Some(name) = self.stack.pop() {
            self.seen.remove(&name);
        }
    }

    /// Returns the current depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Expands macro references against the named blocks of a store.
///
/// References to undefined names are left in place verbatim and collected,
/// so a missing block shows up in the output instead of vanishing.
#[derive(Debug)]
pub struct Expander<'a> {
    store: &'a BlockStore,
    detector: CycleDetector,
    unresolved: Vec<BlockName>,
}

impl<'a> Expander<'a> {
    /// Creates an expander reading from `store`.
    pub fn new(store: &'a BlockStore) -> Self {
        Self {
            store,
            detector: CycleDetector::new(),
            unresolved: Vec::new(),
        }
    }

    /// Marks `name` as being expanded, so references back to it are cycles.
    ///
    /// Used when the block being expanded is itself a named block.
    pub fn within(mut self, name: &BlockName) -> Result<Self> {
        self.detector.enter(name)?;
        Ok(self)
    }

    /// Returns `block` with every resolvable reference replaced by the
    /// referenced block's expansion, and `indent` put in front of every
    /// non-blank literal line.
    pub fn expand(&mut self, block: &CodeBlock, indent: &str) -> Result<CodeBlock> {
        let mut output = CodeBlock::new();
        self.expand_into(block, indent, &mut output)?;
        Ok(output)
    }

    fn expand_into(&mut self, block: &CodeBlock, indent: &str, output: &mut CodeBlock) -> Result<()> {
        let store = self.store;

        for line in block {
            let Some(caps) = REF_PATTERN.captures(&line.text) else {
                output.push(line.indented(indent));
                continue;
            };

            let name = BlockName::new(&caps["name"]);
            match store.get_block(&name) {
                Some(referenced) => {
                    // Prefixes compose literally down the reference chain.
                    let nested = format!("{}{}", indent, &caps["indent"]);
                    self.detector.enter(&name)?;
                    self.expand_into(referenced, &nested, output)?;
                    self.detector.exit();
                }
                None => {
                    tracing::warn!(
                        "Block named {} referenced but not defined ({})",
                        name,
                        line.location
                    );
                    self.unresolved.push(name);
                    output.push(line.clone());
                }
            }
        }

        Ok(())
    }

    /// Names referenced but not defined, once per occurrence, in output order.
    pub fn unresolved(&self) -> &[BlockName] {
        &self.unresolved
    }
}

/// Expands `block` with no caller indentation.
pub fn expand_block(store: &BlockStore, block: &CodeBlock) -> Result<CodeBlock> {
    Expander::new(store).expand(block, "")
}
